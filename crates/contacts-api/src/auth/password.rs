//! 密码处理
//!
//! 提供密码哈希和验证功能。bcrypt 是 CPU 密集型操作，
//! 异步上下文中应通过 `spawn_blocking` 调用。

use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use super::error::{AuthError, AuthResult};

/// 用户不存在时参与比对的占位哈希，使两种登录失败耗时一致
static DUMMY_DIGEST: LazyLock<String> =
    LazyLock::new(|| hash("contacts-dummy-password", DEFAULT_COST).unwrap_or_default());

/// 对密码进行哈希处理
///
/// 使用 bcrypt 算法生成带盐的密码哈希
pub fn hash_password(password: &str) -> AuthResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AuthError::Internal(format!("密码哈希失败: {}", e)))
}

/// 验证密码
///
/// 哈希格式不合法时返回 false，不报错
pub fn verify_password(password: &str, digest: &str) -> bool {
    verify(password, digest).unwrap_or(false)
}

/// 对占位哈希做一次验证，结果恒为 false
pub fn verify_dummy(password: &str) -> bool {
    let _ = verify_password(password, &DUMMY_DIGEST);
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "test_password_123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed));
        assert!(!verify_password("wrong_password", &hashed));
    }

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_malformed_digest_returns_false() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "not-a-bcrypt-hash"));
        assert!(!verify_password("pw", "$2b$12$short"));
    }

    #[test]
    fn test_verify_dummy_never_matches() {
        assert!(!verify_dummy("contacts-dummy-password"));
    }
}
