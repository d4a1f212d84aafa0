use email_sentiment::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    email_sentiment::app::run().await
}
