pub mod chat_service;
pub mod upload_service;
