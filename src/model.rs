use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 전체 지표가 폴백 없이 계산되기 위한 최소 데이터 길이
///
/// RSI(period+1), 볼린저(period), MACD(slow+signal), ATR(period+1) 중
/// 가장 긴 요구 길이는 장기 EMA의 200입니다.
pub const FULL_HISTORY_LEN: usize = 200;

/// OHLCV 캔들 한 개
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv {
    /// 새 캔들 생성
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Ohlcv {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl std::fmt::Display for Ohlcv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ohlcv(t={}, o={}, h={}, l={}, c={}, v={})",
            self.timestamp, self.open, self.high, self.low, self.close, self.volume
        )
    }
}

/// 가격 시계열 구성 오류
///
/// 길이 불일치나 비정상 값은 호출자 측 계약 위반이며,
/// 지표 내부가 아닌 시계열 생성 시점에 걸러냅니다.
#[derive(Debug, PartialEq, Eq)]
pub enum SeriesError {
    /// 빈 시계열
    Empty,
    /// 배열 길이 불일치
    LengthMismatch(String),
    /// NaN/무한대 등 비정상 값
    InvalidValue(String),
}

impl std::fmt::Display for SeriesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesError::Empty => write!(f, "시계열 오류: 데이터가 비어 있습니다"),
            SeriesError::LengthMismatch(msg) => write!(f, "시계열 길이 불일치: {msg}"),
            SeriesError::InvalidValue(msg) => write!(f, "시계열 값 오류: {msg}"),
        }
    }
}

impl From<SeriesError> for String {
    fn from(err: SeriesError) -> Self {
        err.to_string()
    }
}

/// 검증된 가격/거래량 시계열
///
/// 모든 배열은 과거→현재 순서이며 길이가 같습니다.
/// 생성 시점에 검증되므로 지표 함수는 길이 외의 유효성을 다시 확인하지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    close: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    volume: Vec<f64>,
    /// 데이터 제공자가 전달한 당일 변동폭 (없으면 None)
    market_change: Option<f64>,
    /// 데이터 제공자가 전달한 당일 변동률 (비율, 없으면 None)
    market_change_percent: Option<f64>,
}

fn check_finite(name: &str, values: &[f64]) -> Result<(), SeriesError> {
    for (i, value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(SeriesError::InvalidValue(format!(
                "{name}[{i}] = {value}"
            )));
        }
    }
    Ok(())
}

impl PriceSeries {
    /// 종가/고가/저가/거래량 배열로부터 시계열 생성
    ///
    /// # Arguments
    /// * `close` - 종가 배열 (과거→현재)
    /// * `high` - 고가 배열
    /// * `low` - 저가 배열
    /// * `volume` - 거래량 배열
    ///
    /// # Returns
    /// * `Result<PriceSeries, SeriesError>` - 검증된 시계열 또는 오류
    pub fn new(
        close: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        volume: Vec<f64>,
    ) -> Result<PriceSeries, SeriesError> {
        if close.is_empty() {
            return Err(SeriesError::Empty);
        }

        if high.len() != close.len() || low.len() != close.len() || volume.len() != close.len() {
            return Err(SeriesError::LengthMismatch(format!(
                "close={}, high={}, low={}, volume={}",
                close.len(),
                high.len(),
                low.len(),
                volume.len()
            )));
        }

        check_finite("close", &close)?;
        check_finite("high", &high)?;
        check_finite("low", &low)?;
        check_finite("volume", &volume)?;

        Ok(PriceSeries {
            close,
            high,
            low,
            volume,
            market_change: None,
            market_change_percent: None,
        })
    }

    /// 종가만 있는 시계열 생성
    ///
    /// 고가/저가는 종가와 동일하게, 거래량은 0으로 채웁니다.
    /// 종가 기반 지표만 의미 있는 값을 가집니다.
    pub fn from_closes(close: Vec<f64>) -> Result<PriceSeries, SeriesError> {
        let high = close.clone();
        let low = close.clone();
        let volume = vec![0.0; close.len()];
        PriceSeries::new(close, high, low, volume)
    }

    /// 캔들 목록으로부터 시계열 생성
    ///
    /// # Arguments
    /// * `bars` - 과거→현재 순서의 캔들 목록
    pub fn from_bars(bars: &[Ohlcv]) -> Result<PriceSeries, SeriesError> {
        PriceSeries::new(
            bars.iter().map(|bar| bar.close).collect(),
            bars.iter().map(|bar| bar.high).collect(),
            bars.iter().map(|bar| bar.low).collect(),
            bars.iter().map(|bar| bar.volume).collect(),
        )
    }

    /// 당일 변동폭/변동률 설정 (데이터 제공자 전달값)
    pub fn with_market_change(mut self, change: f64, change_percent: f64) -> Self {
        self.market_change = Some(change);
        self.market_change_percent = Some(change_percent);
        self
    }

    /// 종가 배열 참조
    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// 고가 배열 참조
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// 저가 배열 참조
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// 거래량 배열 참조
    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// 데이터 개수
    pub fn len(&self) -> usize {
        self.close.len()
    }

    /// 비어 있는지 여부 (검증된 시계열은 항상 false)
    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// 현재가 (마지막 종가, 반올림 전 원값)
    pub fn current_price(&self) -> f64 {
        self.close[self.close.len() - 1]
    }

    /// 모든 지표가 폴백 없이 계산될 만큼 데이터가 충분한지 여부
    pub fn has_full_history(&self) -> bool {
        self.close.len() >= FULL_HISTORY_LEN
    }

    /// 당일 변동폭
    pub fn market_change(&self) -> Option<f64> {
        self.market_change
    }

    /// 당일 변동률 (비율)
    pub fn market_change_percent(&self) -> Option<f64> {
        self.market_change_percent
    }
}

/// 종합 판단에 따른 매매 액션
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Action {
    /// 매수 계열 액션인지 여부 (STRONG BUY, BUY)
    pub fn is_buy_side(&self) -> bool {
        matches!(self, Action::StrongBuy | Action::Buy)
    }

    /// 매도 계열 액션인지 여부 (SELL, STRONG SELL)
    pub fn is_sell_side(&self) -> bool {
        matches!(self, Action::Sell | Action::StrongSell)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::StrongBuy => write!(f, "STRONG BUY"),
            Action::Buy => write!(f, "BUY"),
            Action::Hold => write!(f, "HOLD"),
            Action::Sell => write!(f, "SELL"),
            Action::StrongSell => write!(f, "STRONG SELL"),
        }
    }
}

/// 신뢰도 기반 추세 라벨
///
/// 액션과 같은 신뢰도 값을 다른 임계값으로 분류한 독립 라벨입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendLabel {
    #[serde(rename = "bullish-strong")]
    BullishStrong,
    #[serde(rename = "bullish")]
    Bullish,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "bearish")]
    Bearish,
    #[serde(rename = "bearish-strong")]
    BearishStrong,
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendLabel::BullishStrong => write!(f, "bullish-strong"),
            TrendLabel::Bullish => write!(f, "bullish"),
            TrendLabel::Neutral => write!(f, "neutral"),
            TrendLabel::Bearish => write!(f, "bearish"),
            TrendLabel::BearishStrong => write!(f, "bearish-strong"),
        }
    }
}

/// 변동성 기반 리스크 등급
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "HIGH")]
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

/// 뉴스 기사 한 건
///
/// 뉴스 수집은 외부 협력자의 책임이며, 엔진은 전달받은 목록을
/// 보고서에 그대로 싣습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_series_rejects_empty() {
        let result = PriceSeries::new(vec![], vec![], vec![], vec![]);
        assert_eq!(result.unwrap_err(), SeriesError::Empty);
    }

    #[test]
    fn test_price_series_rejects_length_mismatch() {
        let result = PriceSeries::new(
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![1.0],
            vec![10.0, 10.0],
        );
        assert!(matches!(result, Err(SeriesError::LengthMismatch(_))));
    }

    #[test]
    fn test_price_series_rejects_nan() {
        let result = PriceSeries::from_closes(vec![1.0, f64::NAN, 3.0]);
        assert!(matches!(result, Err(SeriesError::InvalidValue(_))));
    }

    #[test]
    fn test_current_price_is_last_close() {
        let series = PriceSeries::from_closes(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.current_price(), 3.0);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_full_history_threshold() {
        let series = PriceSeries::from_closes(vec![100.0; FULL_HISTORY_LEN]).unwrap();
        assert!(series.has_full_history());

        let series = PriceSeries::from_closes(vec![100.0; FULL_HISTORY_LEN - 1]).unwrap();
        assert!(!series.has_full_history());
    }

    #[test]
    fn test_action_sides() {
        assert!(Action::StrongBuy.is_buy_side());
        assert!(Action::Buy.is_buy_side());
        assert!(!Action::Hold.is_buy_side());
        assert!(!Action::Hold.is_sell_side());
        assert!(Action::Sell.is_sell_side());
        assert!(Action::StrongSell.is_sell_side());
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::StrongBuy.to_string(), "STRONG BUY");
        assert_eq!(Action::StrongSell.to_string(), "STRONG SELL");
    }

    #[test]
    fn test_from_bars() {
        let bars = vec![
            Ohlcv::new(0, 1.0, 2.0, 0.5, 1.5, 100.0),
            Ohlcv::new(1, 1.5, 2.5, 1.0, 2.0, 200.0),
        ];
        let series = PriceSeries::from_bars(&bars).unwrap();
        assert_eq!(series.close(), &[1.5, 2.0]);
        assert_eq!(series.high(), &[2.0, 2.5]);
        assert_eq!(series.volume(), &[100.0, 200.0]);
    }
}
