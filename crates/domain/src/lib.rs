//! 签证预约自动化系统核心领域模型
//!
//! 包含申请人、登录凭据、预约等核心实体，以及资格校验规则、
//! 领域事件和仓储端口定义。

pub mod eligibility;
pub mod entities;
pub mod errors;
pub mod events;
pub mod repository;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use repository::*;
