pub async fn handler() -> &'static str {
    "Hello from /resource"
}
