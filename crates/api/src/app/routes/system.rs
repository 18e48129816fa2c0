pub async fn liveness() -> &'static str {
    "Up and running..."
}
