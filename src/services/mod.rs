/// AI advice generation via the OpenAI chat completions API
pub mod advice;
/// HTTP health endpoints for the hosting platform
pub mod health;
/// Progress and pattern analysis over stored records
pub mod insights;
/// Daily reflection reminder scheduling
pub mod reflection;
