use uuid::Uuid;

use crate::database::{auth_token_repo, user_repo};
use crate::error::{is_unique_violation, AppError};
use crate::models::{UserProfile, UserRow};
use crate::state::AppState;

pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i64,
    pub gender: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug)]
pub struct AuthSession {
    pub user: UserProfile,
    pub token: String,
}

pub async fn register(state: &AppState, input: RegisterInput) -> Result<AuthSession, AppError> {
    validate_registration(&input)?;

    if user_repo::find_by_email(&state.pool, &input.email).await?.is_some() {
        return Err(AppError::Validation("Email already registered".into()));
    }

    let id = Uuid::new_v4().to_string();
    let password_hash = hash_password(&state.config.auth_pepper, &input.password);

    let insert = user_repo::insert_user(
        &state.pool,
        user_repo::NewUser {
            id: &id,
            name: input.name.trim(),
            email: &input.email,
            password_hash: &password_hash,
            age: input.age,
            gender: &input.gender,
            bio: input.bio.as_deref(),
            location: input.location.as_deref(),
            latitude: input.latitude,
            longitude: input.longitude,
        },
    )
    .await;

    if let Err(e) = insert {
        // Racing registration on the same address.
        if is_unique_violation(&e) {
            return Err(AppError::Validation("Email already registered".into()));
        }
        return Err(e.into());
    }

    let Some(user) = user_repo::find_user(&state.pool, &id).await? else {
        return Err(AppError::NotFound);
    };
    let token = issue_token(state, &user).await?;

    Ok(AuthSession {
        user: user.into(),
        token,
    })
}

pub async fn login(state: &AppState, email: &str, password: &str) -> Result<AuthSession, AppError> {
    let Some(user) = user_repo::find_by_email(&state.pool, email).await? else {
        return Err(AppError::InvalidCredentials);
    };

    if hash_password(&state.config.auth_pepper, password) != user.password_hash {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(state, &user).await?;
    Ok(AuthSession {
        user: user.into(),
        token,
    })
}

pub async fn logout(state: &AppState, token: &str) -> Result<(), AppError> {
    auth_token_repo::delete_token(&state.pool, token).await?;
    Ok(())
}

pub async fn current_user(state: &AppState, user_id: &str) -> Result<UserProfile, AppError> {
    let Some(user) = user_repo::find_user(&state.pool, user_id).await? else {
        return Err(AppError::NotFound);
    };
    Ok(user.into())
}

async fn issue_token(state: &AppState, user: &UserRow) -> Result<String, AppError> {
    let token = Uuid::new_v4().to_string();
    auth_token_repo::insert_token(&state.pool, &token, &user.id).await?;
    Ok(token)
}

fn hash_password(pepper: &str, password: &str) -> String {
    let key = blake3::derive_key("sparkmatch auth v1", pepper.as_bytes());
    blake3::keyed_hash(&key, password.as_bytes())
        .to_hex()
        .to_string()
}

fn validate_registration(input: &RegisterInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if !input.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".into()));
    }
    if input.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if input.age < 18 {
        return Err(AppError::Validation("You must be at least 18".into()));
    }
    if input.age > 100 {
        return Err(AppError::Validation("Age must be 100 or less".into()));
    }
    if !matches!(input.gender.as_str(), "male" | "female" | "other") {
        return Err(AppError::Validation(
            "Gender must be male, female or other".into(),
        ));
    }
    if let Some(lat) = input.latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::Validation("Latitude out of range".into()));
        }
    }
    if let Some(lon) = input.longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(AppError::Validation("Longitude out of range".into()));
        }
    }
    Ok(())
}
