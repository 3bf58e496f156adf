/// `GET /api/startup/check-health`
pub async fn check_health() -> &'static str {
    "I'm okay, I'm fine"
}
