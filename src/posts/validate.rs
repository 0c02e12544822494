use crate::error::ValidationError;

use super::dto::CreatePostRequest;

#[derive(Debug)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

pub fn validate_post(req: &CreatePostRequest) -> Result<PostInput, ValidationError> {
    let title = match req.title.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ValidationError::new("title", "Title is required")),
    };
    let content = match req.content.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => return Err(ValidationError::new("content", "Content is required")),
    };
    Ok(PostInput {
        title: title.to_string(),
        content: content.to_string(),
    })
}
