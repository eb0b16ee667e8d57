//! 联系人实体
//!
//! 每个联系人只属于一个用户，所有查询都按 user_id 隔离

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use validator::Validate;

/// 联系人实体
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Contact {
    pub id: i64,
    /// 所属用户 ID
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 联系人可编辑字段
///
/// 创建和全量更新共用。长度约束与表结构一致，须在 `normalized()` 之后校验
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct ContactFields {
    #[validate(length(min = 1, max = 50, message = "名字长度必须在1-50个字符之间"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "姓氏长度必须在1-50个字符之间"))]
    pub last_name: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(min = 1, max = 30, message = "电话号码长度必须在1-30个字符之间"))]
    pub phone_number: String,
    pub birthday: NaiveDate,
    #[validate(length(max = 255, message = "地址不能超过255个字符"))]
    pub address: Option<String>,
}

impl ContactFields {
    /// 规范化后再入库：姓名首字母大写，邮箱小写
    pub fn normalized(self) -> Self {
        Self {
            first_name: capitalize(self.first_name.trim()),
            last_name: capitalize(self.last_name.trim()),
            email: self.email.trim().to_lowercase(),
            phone_number: self.phone_number.trim().to_string(),
            birthday: self.birthday,
            address: self
                .address
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        }
    }
}

/// 联系人搜索条件
///
/// 多个条件之间为 AND 关系，比较时忽略大小写
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSearch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl ContactSearch {
    /// 去掉空白条件
    pub fn normalized(self) -> Self {
        fn clean(v: Option<String>) -> Option<String> {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            first_name: clean(self.first_name),
            last_name: clean(self.last_name),
            email: clean(self.email),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// 首字母大写，其余小写
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// 生日在指定年份的纪念日
///
/// 2 月 29 日出生的人在平年按 2 月 28 日计
fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day() - 1))
}

/// 从 `today` 起（含当天）的下一个生日
pub fn next_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(birthday, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        anniversary_in(birthday, today.year() + 1)
    }
}

/// 筛选 `[today, today + days]` 内过生日的联系人，按生日先后排序
pub fn upcoming_birthdays(contacts: Vec<Contact>, today: NaiveDate, days: i64) -> Vec<Contact> {
    let end = today + Duration::days(days);

    let mut upcoming: Vec<(NaiveDate, Contact)> = contacts
        .into_iter()
        .filter_map(|contact| {
            let next = next_birthday(contact.birthday, today)?;
            (next <= end).then_some((next, contact))
        })
        .collect();

    upcoming.sort_by_key(|(date, contact)| (*date, contact.id));
    upcoming.into_iter().map(|(_, contact)| contact).collect()
}
