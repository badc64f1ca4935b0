//! 预约类别资格校验规则
//!
//! BLS 系统按申根签证历史把申请人划分到固定的类别档位，
//! 每个受理地点（Oran / Algiers）各有 1-4 档。校验是纯函数，
//! 不依赖网络和存储，便于单独做单元测试。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::booking::{AppointmentFor, VisaBookingRequest};
use crate::errors::{DomainError, DomainResult};

/// 家庭组专用类别，只能通过家庭资格标记显式申请
pub const FAMILY_GROUP_CATEGORY: &str = "FAMILY GROUP";

/// 申根签证历史标签
///
/// 调用方自报的历史分类，决定允许使用的类别档位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchengenHistory {
    /// 从未获得过申根签证
    #[serde(rename = "never")]
    Never,
    /// 2020 年之前签发
    #[serde(rename = "before_2020")]
    Before2020,
    /// 2020 年后签发，有效期不超过 6 个月
    #[serde(rename = "after_2020_6months")]
    After2020UpToSixMonths,
    /// 2020 年后签发，有效期 6 个月到 2 年之间
    #[serde(rename = "after_2020_6months_2years")]
    After2020SixMonthsToTwoYears,
    /// 2020 年后签发，有效期 2 年以上
    #[serde(rename = "after_2020_2years_plus")]
    After2020TwoYearsPlus,
}

impl SchengenHistory {
    /// 全部历史标签，按档位顺序排列
    pub const ALL: [SchengenHistory; 5] = [
        SchengenHistory::Never,
        SchengenHistory::Before2020,
        SchengenHistory::After2020UpToSixMonths,
        SchengenHistory::After2020SixMonthsToTwoYears,
        SchengenHistory::After2020TwoYearsPlus,
    ];

    /// 标签的线上表示
    pub fn as_str(&self) -> &'static str {
        match self {
            SchengenHistory::Never => "never",
            SchengenHistory::Before2020 => "before_2020",
            SchengenHistory::After2020UpToSixMonths => "after_2020_6months",
            SchengenHistory::After2020SixMonthsToTwoYears => "after_2020_6months_2years",
            SchengenHistory::After2020TwoYearsPlus => "after_2020_2years_plus",
        }
    }

    /// 用户可读的说明
    pub fn label(&self) -> &'static str {
        match self {
            SchengenHistory::Never => "Never had a Schengen visa",
            SchengenHistory::Before2020 => "Had Schengen visa before 2020",
            SchengenHistory::After2020UpToSixMonths => {
                "Schengen visa after 2020, valid \u{2264} 6 months"
            }
            SchengenHistory::After2020SixMonthsToTwoYears => {
                "Schengen visa after 2020, valid > 6 months, < 2 years"
            }
            SchengenHistory::After2020TwoYearsPlus => {
                "Schengen visa after 2020, valid \u{2265} 2 years"
            }
        }
    }
}

impl fmt::Display for SchengenHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchengenHistory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == value)
            .ok_or_else(|| {
                DomainError::invalid_argument("schengen_visa_history", "unknown history tag")
            })
    }
}

/// 固定的资格表：历史标签 -> 允许的类别列表
///
/// FAMILY GROUP 不在表内，标准查询永远不会返回它。
pub fn permitted_categories(history: SchengenHistory) -> &'static [&'static str] {
    match history {
        SchengenHistory::Never | SchengenHistory::Before2020 => &["ORAN 1", "ALG 1"],
        SchengenHistory::After2020UpToSixMonths => &["ORAN 2", "ALG 2"],
        SchengenHistory::After2020SixMonthsToTwoYears => &["ORAN 3", "ALG 3"],
        SchengenHistory::After2020TwoYearsPlus => &["ORAN 4", "ALG 4"],
    }
}

/// 类别校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub is_valid: bool,
    /// 允许列表中与受理地点前缀匹配的类别
    pub recommended: Vec<String>,
    pub message: String,
}

/// 校验类别是否与申根历史匹配
///
/// `recommended` 只包含与 `location` 前三个字母（大小写不敏感）
/// 匹配的类别，用于生成可操作的提示文案。
pub fn validate(location: &str, category: &str, history: SchengenHistory) -> EligibilityOutcome {
    let permitted = permitted_categories(history);
    let is_valid = permitted.iter().any(|code| *code == category);
    let recommended = recommended_for_location(location, permitted);

    let message = if is_valid {
        format!("Category '{category}' is valid for your Schengen visa history.")
    } else {
        format!(
            "Category '{category}' does not match your Schengen visa history. Recommended: {}",
            recommended.join(", ")
        )
    };

    EligibilityOutcome {
        is_valid,
        recommended,
        message,
    }
}

/// 字符串标签版本的校验入口
///
/// 未知标签按空允许列表处理：无效且没有任何推荐类别。
pub fn validate_tag(location: &str, category: &str, history_tag: &str) -> EligibilityOutcome {
    match SchengenHistory::from_str(history_tag) {
        Ok(history) => validate(location, category, history),
        Err(_) => EligibilityOutcome {
            is_valid: false,
            recommended: Vec::new(),
            message: format!(
                "Category '{category}' does not match your Schengen visa history. Recommended: "
            ),
        },
    }
}

/// 校验完整的预约请求
///
/// FAMILY GROUP 走单独的家庭资格通道；其余类别在请求携带
/// 历史标签时按资格表校验，未携带则跳过。
pub fn validate_booking(request: &VisaBookingRequest) -> DomainResult<()> {
    if request.category.eq_ignore_ascii_case(FAMILY_GROUP_CATEGORY) {
        if request.appointment_for != AppointmentFor::Family {
            return Err(DomainError::family_group_not_eligible(
                "family group bookings require a family appointment",
            ));
        }
        if !request.family_group_eligible {
            return Err(DomainError::family_group_not_eligible(
                "reserved for children under 12 accompanied by a parent holding a visa valid more than 180 days",
            ));
        }
        return Ok(());
    }

    if let Some(history) = request.schengen_visa_history {
        let outcome = validate(&request.location, &request.category, history);
        if !outcome.is_valid {
            return Err(DomainError::category_not_eligible(
                request.category.clone(),
                outcome.recommended,
            ));
        }
    }

    Ok(())
}

fn recommended_for_location(location: &str, permitted: &[&str]) -> Vec<String> {
    let prefix: String = location.chars().take(3).collect::<String>().to_uppercase();
    permitted
        .iter()
        .filter(|code| code.to_uppercase().starts_with(&prefix))
        .map(|code| (*code).to_string())
        .collect()
}

/// 签证类型与类别目录
///
/// 对应前端表单需要的全部静态选项。
#[derive(Debug, Clone, Serialize)]
pub struct VisaInfo {
    pub visa_types: Vec<&'static str>,
    pub visa_sub_types: Vec<&'static str>,
    pub locations: Vec<&'static str>,
    pub categories_by_location: Vec<LocationCategories>,
    pub category_requirements: Vec<CategoryRequirement>,
    pub schengen_history_options: Vec<HistoryOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationCategories {
    pub location: &'static str,
    pub categories: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRequirement {
    pub category: &'static str,
    pub requirement: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl VisaInfo {
    pub fn catalog() -> Self {
        Self {
            visa_types: vec![
                "National Visa",
                "Schengen Visa",
                "Schengen visa (Estonia)",
                "First application / premi\u{e8}re demande",
                "Visa renewal / renouvellement de visa",
            ],
            visa_sub_types: vec![
                "Tourism",
                "Family reunification visa",
                "Study visa",
                "Schengen Visa",
            ],
            locations: vec!["Oran", "Algiers"],
            categories_by_location: vec![
                LocationCategories {
                    location: "Oran",
                    categories: vec!["ORAN 1", "ORAN 2", "ORAN 3", "ORAN 4"],
                },
                LocationCategories {
                    location: "Algiers",
                    categories: vec!["ALG 1", "ALG 2", "ALG 3", "ALG 4"],
                },
            ],
            category_requirements: vec![
                CategoryRequirement {
                    category: "ORAN 1",
                    requirement: "Never obtained a Schengen visa or issued before 2020",
                },
                CategoryRequirement {
                    category: "ORAN 2",
                    requirement: "Schengen visa after Jan 1, 2020, valid \u{2264} 6 months",
                },
                CategoryRequirement {
                    category: "ORAN 3",
                    requirement: "Schengen visa after Jan 1, 2020, valid > 6 months, < 2 years",
                },
                CategoryRequirement {
                    category: "ORAN 4",
                    requirement: "Schengen visa after Jan 1, 2020, valid \u{2265} 2 years",
                },
                CategoryRequirement {
                    category: "ALG 1",
                    requirement: "Never obtained a Schengen visa or issued before 2020",
                },
                CategoryRequirement {
                    category: "ALG 2",
                    requirement: "Schengen visa after Jan 1, 2020, valid \u{2264} 6 months",
                },
                CategoryRequirement {
                    category: "ALG 3",
                    requirement: "Schengen visa after Jan 1, 2020, valid > 6 months, < 2 years",
                },
                CategoryRequirement {
                    category: "ALG 4",
                    requirement: "Schengen visa after Jan 1, 2020, valid \u{2265} 2 years",
                },
                CategoryRequirement {
                    category: FAMILY_GROUP_CATEGORY,
                    requirement:
                        "Exclusively for children < 12 whose parents hold visa valid > 180 days",
                },
            ],
            schengen_history_options: SchengenHistory::ALL
                .into_iter()
                .map(|tag| HistoryOption {
                    value: tag.as_str(),
                    label: tag.label(),
                })
                .collect(),
        }
    }
}
