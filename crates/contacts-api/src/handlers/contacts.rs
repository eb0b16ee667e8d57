//! 联系人 HTTP 处理器
//!
//! 所有接口都在认证中间件之后，只操作当前用户自己的联系人

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{BirthdayParams, ContactRequest, ContactResponse, ListParams, SearchParams};
use crate::error::{ApiError, Result};
use crate::models::{ContactSearch, User, upcoming_birthdays};
use crate::state::AppState;

fn to_responses(contacts: Vec<crate::models::Contact>) -> Vec<ContactResponse> {
    contacts.into_iter().map(ContactResponse::from).collect()
}

/// 联系人列表
///
/// GET /api/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ContactResponse>>> {
    let Query(params) = params?;
    let contacts = state
        .contacts
        .list(user.id, params.skip(), params.limit())
        .await?;
    Ok(Json(to_responses(contacts)))
}

/// 联系人详情
///
/// GET /api/contacts/{id}
pub async fn get_contact(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<ContactResponse>> {
    let Path(id) = id?;
    let contact = state
        .contacts
        .get(user.id, id)
        .await?
        .ok_or(ApiError::ContactNotFound(id))?;
    Ok(Json(contact.into()))
}

/// 创建联系人
///
/// POST /api/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let Json(req) = payload?;
    let fields = req.into_fields()?;

    let contact = state.contacts.create(user.id, fields).await?;
    tracing::info!(user_id = user.id, contact_id = contact.id, "Contact created");

    Ok((StatusCode::CREATED, Json(contact.into())))
}

/// 更新联系人（全量替换）
///
/// PUT /api/contacts/{id}
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Path(id) = id?;
    let Json(req) = payload?;
    let fields = req.into_fields()?;

    let contact = state
        .contacts
        .update(user.id, id, fields)
        .await?
        .ok_or(ApiError::ContactNotFound(id))?;
    Ok(Json(contact.into()))
}

/// 删除联系人
///
/// DELETE /api/contacts/{id}
pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<StatusCode> {
    let Path(id) = id?;
    if !state.contacts.delete(user.id, id).await? {
        return Err(ApiError::ContactNotFound(id));
    }
    tracing::info!(user_id = user.id, contact_id = id, "Contact deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// 搜索联系人
///
/// GET /api/contacts/search?first_name=&last_name=&email=
pub async fn search_contacts(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<ContactResponse>>> {
    let Query(params) = params?;
    let search: ContactSearch = params.into();
    if search.is_empty() {
        return Err(ApiError::Validation(
            "至少需要提供 first_name、last_name 或 email 之一".to_string(),
        ));
    }

    let contacts = state.contacts.search(user.id, &search).await?;
    Ok(Json(to_responses(contacts)))
}

/// 即将过生日的联系人
///
/// GET /api/contacts/birthdays?days=7
pub async fn upcoming_birthday_contacts(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    params: std::result::Result<Query<BirthdayParams>, QueryRejection>,
) -> Result<Json<Vec<ContactResponse>>> {
    let Query(params) = params?;
    params.validate()?;

    let contacts = state.contacts.list_all(user.id).await?;
    let today = Utc::now().date_naive();
    Ok(Json(to_responses(upcoming_birthdays(
        contacts,
        today,
        params.days(),
    ))))
}
