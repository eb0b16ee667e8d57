//! 请求 DTO 定义
//!
//! 所有 REST API 的请求参数和请求体结构

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::models::{ContactFields, ContactSearch};

/// 默认分页大小，同时也是上限
pub const MAX_PAGE_SIZE: i64 = 100;

/// 默认生日提醒窗口（天）
pub const DEFAULT_BIRTHDAY_DAYS: i64 = 7;

/// 注册请求
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 50, message = "用户名长度必须在1-50个字符之间"))]
    pub username: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 6, max = 255, message = "密码长度必须在6-255个字符之间"))]
    pub password: String,
}

/// 登录表单
///
/// 表单字段沿用 OAuth2 密码模式的命名，`username` 中填写邮箱
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// 创建/更新联系人请求
///
/// 校验在转换为规范化的 [`ContactFields`] 之后进行
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub address: Option<String>,
}

impl ContactRequest {
    /// 规范化并校验，得到可直接入库的字段
    pub fn into_fields(self) -> Result<ContactFields, validator::ValidationErrors> {
        let fields = ContactFields {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            birthday: self.birthday,
            address: self.address,
        }
        .normalized();
        fields.validate()?;
        Ok(fields)
    }
}

/// 列表分页参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// 限制在 1..=100 之间
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// 联系人搜索参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl From<SearchParams> for ContactSearch {
    fn from(params: SearchParams) -> Self {
        Self {
            first_name: params.first_name,
            last_name: params.last_name,
            email: params.email,
        }
        .normalized()
    }
}

/// 生日提醒参数
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BirthdayParams {
    #[validate(range(min = 0, max = 366, message = "天数必须在0-366之间"))]
    pub days: Option<i64>,
}

impl BirthdayParams {
    pub fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_BIRTHDAY_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_validation() {
        let ok = SignupRequest {
            username: "alice".into(),
            email: "a@x.com".into(),
            password: "secret".into(),
        };
        assert!(ok.validate().is_ok());

        let short_password = SignupRequest {
            password: "12345".into(),
            ..ok
        };
        assert!(short_password.validate().is_err());

        let bad_email = SignupRequest {
            username: "alice".into(),
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        assert!(bad_email.validate().is_err());

        let long_name = SignupRequest {
            username: "x".repeat(51),
            email: "a@x.com".into(),
            password: "secret".into(),
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_list_params_clamped() {
        let params = ListParams::default();
        assert_eq!((params.skip(), params.limit()), (0, 100));

        let params = ListParams {
            skip: Some(-5),
            limit: Some(1000),
        };
        assert_eq!((params.skip(), params.limit()), (0, 100));

        let params = ListParams {
            skip: Some(10),
            limit: Some(0),
        };
        assert_eq!((params.skip(), params.limit()), (10, 1));
    }

    #[test]
    fn test_birthday_params() {
        assert_eq!(BirthdayParams::default().days(), 7);
        assert!(BirthdayParams { days: Some(-1) }.validate().is_err());
        assert!(BirthdayParams { days: Some(30) }.validate().is_ok());
    }

    #[test]
    fn test_contact_request_deserialize() {
        let req: ContactRequest = serde_json::from_str(
            r#"{"first_name":"ann","last_name":"lee","email":"Ann@X.com",
                "phone_number":"123","birthday":"1990-02-28"}"#,
        )
        .unwrap();
        assert!(req.address.is_none());

        let fields = req.into_fields().unwrap();
        assert_eq!(fields.first_name, "Ann");
        assert_eq!(fields.email, "ann@x.com");
        assert_eq!(fields.birthday, NaiveDate::from_ymd_opt(1990, 2, 28).unwrap());
    }

    #[test]
    fn test_contact_request_rejects_overlong_normalized_name() {
        let req: ContactRequest = serde_json::from_value(serde_json::json!({
            "first_name": "ß".repeat(50),
            "last_name": "lee",
            "email": "a@x.com",
            "phone_number": "123",
            "birthday": "1990-02-28"
        }))
        .unwrap();
        assert!(req.into_fields().is_err());
    }

    #[test]
    fn test_search_params_drop_blank_criteria() {
        let search: ContactSearch = SearchParams {
            first_name: Some("  ".into()),
            ..Default::default()
        }
        .into();
        assert!(search.is_empty());
    }
}
