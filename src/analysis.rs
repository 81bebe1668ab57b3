use crate::analyzer::level_analyzer::{self, TradingLevels};
use crate::analyzer::score_analyzer::{self, ScoreResult};
use crate::config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult, ConfigValidation};
use crate::indicator::IndicatorSnapshot;
use crate::indicator::atr::ATR;
use crate::indicator::bband::BollingerBands;
use crate::indicator::ema_trend::{EMATrend, TrendDirection};
use crate::indicator::macd::MACD;
use crate::indicator::obv::OBV;
use crate::indicator::rsi::RSI;
use crate::indicator::utils::round2;
use crate::model::{Action, NewsArticle, PriceSeries, RiskLevel, TrendLabel};
use crate::symbol_catalog::SymbolCatalog;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::PathBuf;

/// 보고서를 만들기 위한 최소 데이터 길이
///
/// 이보다 짧은 시계열은 분석 대상에서 제외됩니다.
pub const MIN_REPORT_LEN: usize = 20;

/// RSI 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RSIConfig {
    pub period: usize,
}

impl Default for RSIConfig {
    fn default() -> Self {
        RSIConfig { period: 14 }
    }
}

/// 볼린저 밴드 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    /// 표준편차 승수
    pub multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        BollingerConfig {
            period: 20,
            multiplier: 2.0,
        }
    }
}

/// MACD 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MACDConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MACDConfig {
    fn default() -> Self {
        MACDConfig {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// EMA 추세 분석 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EMAConfig {
    pub short_period: usize,
    pub mid_period: usize,
    pub long_period: usize,
}

impl Default for EMAConfig {
    fn default() -> Self {
        EMAConfig {
            short_period: 20,
            mid_period: 50,
            long_period: 200,
        }
    }
}

/// ATR 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ATRConfig {
    pub period: usize,
}

impl Default for ATRConfig {
    fn default() -> Self {
        ATRConfig { period: 14 }
    }
}

/// 분석 엔진 설정
///
/// 기본값은 표준 파라미터(RSI 14, 볼린저 20/2, MACD 12/26/9,
/// EMA 20/50/200, ATR 14)입니다. 점수 버킷과 임계값은 설정이 아니라
/// 엔진 정의에 속하므로 여기에 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub rsi: RSIConfig,
    pub bollinger: BollingerConfig,
    pub macd: MACDConfig,
    pub ema: EMAConfig,
    pub atr: ATRConfig,
}

impl AnalysisConfig {
    /// 기본 설정 파일 경로
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config").join("analysis.toml")
    }

    /// 설정 파일에서 로드
    ///
    /// # Arguments
    /// * `path` - TOML 또는 JSON 설정 파일 경로
    pub fn from_file(path: &std::path::Path) -> ConfigResult<AnalysisConfig> {
        ConfigLoader::load_from_file(path, ConfigFormat::Auto)
    }
}

impl ConfigValidation for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.rsi.period == 0 {
            return Err(ConfigError::ValidationError(
                "RSI 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.bollinger.period == 0 {
            return Err(ConfigError::ValidationError(
                "볼린저 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.bollinger.multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(
                "볼린저 승수는 0보다 커야 합니다".to_string(),
            ));
        }
        if self.macd.fast_period == 0 || self.macd.signal_period == 0 {
            return Err(ConfigError::ValidationError(
                "MACD 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        if self.macd.fast_period >= self.macd.slow_period {
            return Err(ConfigError::ValidationError(format!(
                "MACD 빠른 기간({})은 느린 기간({})보다 짧아야 합니다",
                self.macd.fast_period, self.macd.slow_period
            )));
        }
        if self.ema.short_period == 0
            || self.ema.short_period >= self.ema.mid_period
            || self.ema.mid_period >= self.ema.long_period
        {
            return Err(ConfigError::ValidationError(format!(
                "EMA 기간은 단기 < 중기 < 장기 순이어야 합니다: {}/{}/{}",
                self.ema.short_period, self.ema.mid_period, self.ema.long_period
            )));
        }
        if self.atr.period == 0 {
            return Err(ConfigError::ValidationError(
                "ATR 기간은 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(())
    }
}

/// 한 시계열에 대한 분석 결과
///
/// 지표 묶음 → 종합 점수 → 트레이딩 레벨의 단방향 파이프라인
/// 출력입니다.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Analysis {
    pub indicators: IndicatorSnapshot,
    pub score: ScoreResult,
    pub levels: TradingLevels,
}

/// 단기/중기 구간 분석
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermAnalysis {
    /// 구간 변화율 (%, 소수점 둘째 자리 반올림)
    pub change: f64,
    /// 구간 요약 설명
    pub description: String,
    /// 구간 이름
    pub period: String,
}

/// 구간 변화율: 창 첫 종가 대비 마지막 종가의 변화율(%)
fn window_change_percent(closes: &[f64], window: usize) -> f64 {
    let window = &closes[closes.len().saturating_sub(window)..];
    let first = window[0];
    let last = window[window.len() - 1];
    (last - first) / first * 100.0
}

/// 단기(20 구간) 분석: 변화율 + RSI 기반 요약
fn short_term_analysis(closes: &[f64], rsi: f64) -> TermAnalysis {
    let change = window_change_percent(closes, 20);

    let description = if change > 5.0 {
        let momentum = if rsi > 70.0 { "과매수" } else { "모멘텀 양호" };
        format!("강한 상승 추세. RSI {rsi}: {momentum}")
    } else if change > 0.0 {
        format!("완만한 상승 추세. RSI {rsi}: 횡보 구간")
    } else if change > -5.0 {
        format!("완만한 하락 추세. RSI {rsi}: 약세")
    } else {
        let momentum = if rsi < 30.0 { "과매도" } else { "하락 압력" };
        format!("강한 하락 추세. RSI {rsi}: {momentum}")
    };

    TermAnalysis {
        change: round2(change),
        description,
        period: "20일".to_string(),
    }
}

/// 중기(60 구간) 분석: 변화율 + EMA 추세 기반 요약
fn medium_term_analysis(closes: &[f64], trend: TrendDirection) -> TermAnalysis {
    let change = window_change_percent(closes, 60);

    let description = if change > 10.0 {
        let strength = if trend == TrendDirection::StrongBullish {
            "매우 강한 상승"
        } else {
            "상승"
        };
        format!("{strength} 추세. EMA 정배열.")
    } else if change > 0.0 {
        format!("상승 추세. EMA {trend}: 상승 속 횡보.")
    } else if change > -10.0 {
        format!("하락 추세. EMA {trend}: 하락 압력.")
    } else {
        let strength = if trend == TrendDirection::StrongBearish {
            "매우 강한 하락"
        } else {
            "하락"
        };
        format!("{strength} 추세. EMA 역배열.")
    };

    TermAnalysis {
        change: round2(change),
        description,
        period: "60일".to_string(),
    }
}

/// 한 종목에 대한 최종 분석 보고서
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub name: String,
    /// 현재가 (소수점 둘째 자리 반올림)
    pub current_price: f64,
    /// 당일 변동폭 (제공자 값 없으면 0)
    pub price_change: f64,
    /// 당일 변동률 (%, 제공자 값 없으면 0)
    pub price_change_percent: f64,
    pub trend: TrendLabel,
    pub action: Action,
    pub confidence: f64,
    pub risk: RiskLevel,
    pub indicators: IndicatorSnapshot,
    pub trading_levels: TradingLevels,
    pub short_term: TermAnalysis,
    pub medium_term: TermAnalysis,
    pub news: Vec<NewsArticle>,
    /// 보고서 생성 시각
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    /// 분석 결과와 부가 정보로 보고서 조립
    ///
    /// # Arguments
    /// * `symbol` - 심볼
    /// * `name` - 표시 이름
    /// * `series` - 분석에 사용한 시계열
    /// * `analysis` - 엔진 분석 결과
    /// * `news` - 뉴스 목록 (외부 협력자가 수집)
    pub fn assemble(
        symbol: &str,
        name: &str,
        series: &PriceSeries,
        analysis: Analysis,
        news: Vec<NewsArticle>,
    ) -> AnalysisReport {
        let closes = series.close();

        // 변동률은 비율로 전달되므로 백분율 둘째 자리로 환산한다
        let price_change = series.market_change().map(round2).unwrap_or(0.0);
        let price_change_percent = series
            .market_change_percent()
            .map(|p| (p * 10_000.0).round() / 100.0)
            .unwrap_or(0.0);

        AnalysisReport {
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: round2(series.current_price()),
            price_change,
            price_change_percent,
            trend: analysis.score.trend,
            action: analysis.score.action,
            confidence: analysis.score.confidence,
            risk: analysis.score.risk,
            short_term: short_term_analysis(closes, analysis.indicators.rsi.value),
            medium_term: medium_term_analysis(closes, analysis.indicators.ema.trend),
            indicators: analysis.indicators,
            trading_levels: analysis.levels,
            news,
            timestamp: Utc::now(),
        }
    }
}

impl Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {} {:.1}% [{}]",
            self.name, self.symbol, self.action, self.confidence, self.risk
        )
    }
}

/// 보고서 목록 요약
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total: usize,
    pub strong_buy: usize,
    pub buy: usize,
    pub hold: usize,
    pub sell: usize,
    pub strong_sell: usize,
    /// 평균 신뢰도 (소수점 첫째 자리)
    pub average_confidence: f64,
}

impl AnalysisSummary {
    /// 보고서 목록을 액션별 건수와 평균 신뢰도로 요약
    pub fn summarize(reports: &[AnalysisReport]) -> AnalysisSummary {
        let mut summary = AnalysisSummary {
            total: reports.len(),
            ..AnalysisSummary::default()
        };

        for report in reports {
            match report.action {
                Action::StrongBuy => summary.strong_buy += 1,
                Action::Buy => summary.buy += 1,
                Action::Hold => summary.hold += 1,
                Action::Sell => summary.sell += 1,
                Action::StrongSell => summary.strong_sell += 1,
            }
        }

        if summary.total > 0 {
            let sum: f64 = reports.iter().map(|r| r.confidence).sum();
            summary.average_confidence = (sum / summary.total as f64 * 10.0).round() / 10.0;
        }

        summary
    }
}

/// 기술적 분석 엔진
///
/// 설정과 심볼 카탈로그만 보유하는 무상태 파사드입니다. 모든 연산은
/// 인자에 대한 순수 함수이며, 같은 시계열은 항상 같은 결과를
/// 냅니다. 여러 종목 분석은 호출자 쪽에서 자유롭게 병렬화할 수
/// 있습니다.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    catalog: SymbolCatalog,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        AnalysisEngine::new(AnalysisConfig::default())
    }
}

impl AnalysisEngine {
    /// 설정으로 엔진 생성 (카탈로그는 내장 기본값)
    pub fn new(config: AnalysisConfig) -> AnalysisEngine {
        AnalysisEngine {
            config,
            catalog: SymbolCatalog::default_catalog().clone(),
        }
    }

    /// 설정과 카탈로그를 지정해 엔진 생성
    pub fn with_catalog(config: AnalysisConfig, catalog: SymbolCatalog) -> AnalysisEngine {
        AnalysisEngine { config, catalog }
    }

    /// 현재 설정 참조
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 심볼 카탈로그 참조
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// 시계열에서 전체 지표 묶음 계산
    ///
    /// 데이터가 부족한 지표는 각자의 문서화된 폴백 값을 가집니다.
    pub fn snapshot(&self, series: &PriceSeries) -> IndicatorSnapshot {
        let closes = series.close();

        IndicatorSnapshot {
            rsi: RSI::calculate(closes, self.config.rsi.period),
            bollinger: BollingerBands::calculate(
                closes,
                self.config.bollinger.period,
                self.config.bollinger.multiplier,
            ),
            macd: MACD::calculate(
                closes,
                self.config.macd.fast_period,
                self.config.macd.slow_period,
                self.config.macd.signal_period,
            ),
            ema: EMATrend::calculate(
                closes,
                self.config.ema.short_period,
                self.config.ema.mid_period,
                self.config.ema.long_period,
            ),
            atr: ATR::calculate(
                series.high(),
                series.low(),
                closes,
                self.config.atr.period,
            ),
            obv: OBV::calculate(closes, series.volume()),
        }
    }

    /// 시계열 분석: 지표 → 종합 점수 → 트레이딩 레벨
    ///
    /// 실패 경로가 없습니다. 짧은 시계열은 폴백 지표 값으로
    /// 계산되어 중립에 가까운 결과가 나옵니다.
    pub fn analyze(&self, series: &PriceSeries) -> Analysis {
        let indicators = self.snapshot(series);
        let score = score_analyzer::calculate_score(&indicators);
        let levels = level_analyzer::calculate_trading_levels(
            series.current_price(),
            &indicators,
            score.action,
        );

        Analysis {
            indicators,
            score,
            levels,
        }
    }

    /// 종목 하나에 대한 보고서 생성
    ///
    /// 데이터가 `MIN_REPORT_LEN` 미만이면 경고 로그만 남기고 None을
    /// 반환합니다 (해당 종목은 건너뜁니다).
    ///
    /// # Arguments
    /// * `symbol` - 심볼
    /// * `series` - 시계열 (외부 협력자가 수집)
    /// * `news` - 뉴스 목록 (외부 협력자가 수집, 없으면 빈 목록)
    pub fn analyze_symbol(
        &self,
        symbol: &str,
        series: &PriceSeries,
        news: Vec<NewsArticle>,
    ) -> Option<AnalysisReport> {
        if series.len() < MIN_REPORT_LEN {
            warn!("데이터 부족으로 건너뜀: {symbol} ({}개)", series.len());
            return None;
        }

        debug!("분석 시작: {symbol} ({}개 데이터)", series.len());
        let analysis = self.analyze(series);
        let report = AnalysisReport::assemble(
            symbol,
            self.catalog.display_name(symbol),
            series,
            analysis,
            news,
        );

        info!(
            "분석 완료: {symbol} → {} ({:.1}%)",
            report.action, report.confidence
        );
        Some(report)
    }
}
