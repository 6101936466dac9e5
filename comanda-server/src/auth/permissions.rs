//! 角色授权
//!
//! 每个受保护的操作声明一个允许的角色集合，空集合表示
//! 任何已登录账号均可访问。

use shared::Role;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::security_log;

/// 仅管理员
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// 管理员或其员工
pub const RESTAURANT_STAFF: &[Role] = &[Role::Admin, Role::Worker];

/// 任何已登录账号
pub const ANY_AUTHENTICATED: &[Role] = &[];

impl CurrentUser {
    /// 检查当前用户角色是否在允许集合内
    ///
    /// 空集合 = 任何已登录账号。角色不匹配返回 403 Forbidden。
    pub fn authorize(&self, allowed: &[Role]) -> Result<(), AppError> {
        if allowed.is_empty() || allowed.contains(&self.role) {
            return Ok(());
        }

        security_log!(
            "WARN",
            "role_denied",
            user_id = self.id.clone(),
            user_role = self.role.to_string(),
            allowed = format!("{:?}", allowed)
        );
        Err(AppError::Forbidden(format!(
            "Requires one of roles: {:?}",
            allowed
        )))
    }

    /// 是否管理员
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(role: Role) -> CurrentUser {
        CurrentUser {
            id: "user:abc".to_string(),
            role,
        }
    }

    #[test]
    fn test_admin_passes_admin_only() {
        assert!(user_with(Role::Admin).authorize(ADMIN_ONLY).is_ok());
    }

    #[test]
    fn test_worker_rejected_by_admin_only() {
        let err = user_with(Role::Worker).authorize(ADMIN_ONLY).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_empty_set_allows_any_role() {
        for role in [Role::User, Role::Worker, Role::Admin] {
            assert!(user_with(role).authorize(ANY_AUTHENTICATED).is_ok());
        }
    }

    #[test]
    fn test_staff_set_rejects_customer() {
        assert!(user_with(Role::Worker).authorize(RESTAURANT_STAFF).is_ok());
        assert!(user_with(Role::User).authorize(RESTAURANT_STAFF).is_err());
    }
}
