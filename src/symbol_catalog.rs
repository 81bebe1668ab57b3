use crate::config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult, ConfigValidation};
use log::info;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// 분석 대상 심볼 그룹
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolGroup {
    /// 그룹 이름
    pub name: String,
    /// 그룹에 속한 심볼 목록
    pub symbols: Vec<String>,
}

/// 분석 대상 심볼 카탈로그
///
/// 그룹 목록과 심볼별 표시 이름으로 구성된 불변 조회 테이블입니다.
/// 기본 카탈로그가 내장되어 있고, 설정 파일에서 교체 로드할 수
/// 있습니다. 엔진은 카탈로그를 수정하지 않습니다.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    /// 심볼 그룹 목록 (표시 순서 유지)
    pub groups: Vec<SymbolGroup>,
    /// 심볼 → 표시 이름
    pub names: HashMap<String, String>,
}

static DEFAULT_CATALOG: Lazy<SymbolCatalog> = Lazy::new(|| {
    let groups = vec![
        SymbolGroup {
            name: "미국 기술주".to_string(),
            symbols: [
                "NVDA", "ARM", "GOOGL", "META", "AAPL", "AMZN", "MSFT", "NFLX", "TSLA", "BABA",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        },
        SymbolGroup {
            name: "지수".to_string(),
            symbols: ["SPX", "NDX", "DAX", "FTSE", "AEX", "EU50", "HSI"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        SymbolGroup {
            name: "원자재".to_string(),
            symbols: ["NG", "XAU", "CL", "XAG"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
    ];

    let names = [
        ("NVDA", "NVIDIA"),
        ("ARM", "ARM Holdings"),
        ("GOOGL", "Alphabet"),
        ("META", "Meta"),
        ("AAPL", "Apple"),
        ("AMZN", "Amazon"),
        ("MSFT", "Microsoft"),
        ("NFLX", "Netflix"),
        ("TSLA", "Tesla"),
        ("BABA", "Alibaba"),
        ("SPX", "S&P 500"),
        ("NDX", "Nasdaq 100"),
        ("DAX", "Germany 40"),
        ("FTSE", "UK 100"),
        ("AEX", "Netherlands 25"),
        ("EU50", "Euro Stoxx 50"),
        ("HSI", "Hong Kong 50"),
        ("NG", "Natural Gas"),
        ("XAU", "Gold"),
        ("CL", "Crude Oil WTI"),
        ("XAG", "Silver"),
    ]
    .iter()
    .map(|(symbol, name)| (symbol.to_string(), name.to_string()))
    .collect();

    SymbolCatalog { groups, names }
});

impl SymbolCatalog {
    /// 내장 기본 카탈로그 참조
    pub fn default_catalog() -> &'static SymbolCatalog {
        &DEFAULT_CATALOG
    }

    /// 설정 파일에서 카탈로그 로드
    ///
    /// # Arguments
    /// * `path` - TOML 또는 JSON 카탈로그 파일 경로
    pub fn from_file(path: &Path) -> ConfigResult<SymbolCatalog> {
        let catalog: SymbolCatalog = ConfigLoader::load_from_file(path, ConfigFormat::Auto)?;
        info!("심볼 카탈로그 로드 완료: {}개 심볼", catalog.len());
        Ok(catalog)
    }

    /// 그룹 순서대로 평탄화한 전체 심볼 목록
    pub fn all_symbols(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.symbols.iter().map(|s| s.as_str()))
            .collect()
    }

    /// 심볼의 표시 이름 (등록되지 않은 심볼은 심볼 그대로)
    pub fn display_name<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.names.get(symbol).map(|name| name.as_str()).unwrap_or(symbol)
    }

    /// 심볼이 카탈로그에 있는지 확인
    pub fn contains(&self, symbol: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.symbols.iter().any(|s| s == symbol))
    }

    /// 전체 심볼 수
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.symbols.len()).sum()
    }

    /// 카탈로그가 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ConfigValidation for SymbolCatalog {
    fn validate(&self) -> ConfigResult<()> {
        if self.groups.is_empty() {
            return Err(ConfigError::ValidationError(
                "심볼 그룹이 비어 있습니다".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if group.name.is_empty() {
                return Err(ConfigError::ValidationError(
                    "그룹 이름이 비어 있습니다".to_string(),
                ));
            }
            if group.symbols.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "그룹에 심볼이 없습니다: {}",
                    group.name
                )));
            }
            for symbol in &group.symbols {
                if !seen.insert(symbol.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "중복된 심볼: {symbol}"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = SymbolCatalog::default_catalog();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 21);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_all_symbols_preserves_group_order() {
        let catalog = SymbolCatalog::default_catalog();
        let symbols = catalog.all_symbols();
        assert_eq!(symbols.first(), Some(&"NVDA"));
        assert_eq!(symbols.last(), Some(&"XAG"));
        assert_eq!(symbols.len(), catalog.len());
    }

    #[test]
    fn test_display_name_lookup_and_fallback() {
        let catalog = SymbolCatalog::default_catalog();
        assert_eq!(catalog.display_name("NVDA"), "NVIDIA");
        assert_eq!(catalog.display_name("XAU"), "Gold");
        // 등록되지 않은 심볼은 심볼 그대로
        assert_eq!(catalog.display_name("UNKNOWN"), "UNKNOWN");
    }

    #[test]
    fn test_contains() {
        let catalog = SymbolCatalog::default_catalog();
        assert!(catalog.contains("TSLA"));
        assert!(!catalog.contains("UNKNOWN"));
    }

    #[test]
    fn test_duplicate_symbol_is_rejected() {
        let catalog = SymbolCatalog {
            groups: vec![
                SymbolGroup {
                    name: "a".to_string(),
                    symbols: vec!["AAA".to_string()],
                },
                SymbolGroup {
                    name: "b".to_string(),
                    symbols: vec!["AAA".to_string()],
                },
            ],
            names: HashMap::new(),
        };
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_group_is_rejected() {
        let catalog = SymbolCatalog {
            groups: vec![SymbolGroup {
                name: "empty".to_string(),
                symbols: vec![],
            }],
            names: HashMap::new(),
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_catalog_round_trip_toml() {
        let catalog = SymbolCatalog::default_catalog();
        let toml_str = toml::to_string_pretty(catalog).unwrap();
        let loaded: SymbolCatalog =
            crate::config_loader::ConfigLoader::load_from_string(&toml_str, ConfigFormat::Toml)
                .unwrap();
        assert_eq!(&loaded, catalog);
    }
}
