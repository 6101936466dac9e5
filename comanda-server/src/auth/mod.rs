//! 认证模块
//!
//! JWT 签发/验证 + 角色授权。令牌验证是单一挂起点，结果
//! 模式匹配为成功/失败，处理函数通过 [`CurrentUser`] 提取器获得身份。

pub mod extractor;
pub mod jwt;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use permissions::{ADMIN_ONLY, ANY_AUTHENTICATED, RESTAURANT_STAFF};
