use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    // 200 with data
    pub fn success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    // 201 with the created resource
    pub fn created(data: T) -> HttpResponse {
        HttpResponse::Created().json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    // Success with data and message
    pub fn success_with_message(data: T, message: &str) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        })
    }
}

impl ApiResponse<()> {
    // Success with message only
    pub fn success_message(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        })
    }

    // Error response (no data)
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}
