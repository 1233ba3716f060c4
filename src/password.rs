//! bcrypt hashing, run off the async executor.

use crate::error::AppError;

pub async fn hash(password: String, cost: u32) -> Result<String, AppError> {
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hashed)
}

pub async fn verify(password: String, hashed: String) -> Result<bool, AppError> {
    let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed)).await??;
    Ok(ok)
}
