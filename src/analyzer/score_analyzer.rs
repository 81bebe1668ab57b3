use crate::indicator::IndicatorSnapshot;
use crate::indicator::atr::Volatility;
use crate::indicator::bband::BandPosition;
use crate::indicator::ema_trend::TrendDirection;
use crate::indicator::macd::MACDTrend;
use crate::indicator::obv::OBVTrend;
use crate::model::{Action, RiskLevel, TrendLabel};
use serde::Serialize;
use std::fmt::Display;

/// 버킷 합의 실제 최댓값
///
/// 분모는 100으로 고정되어 있으므로 신뢰도 100%는 나오지 않습니다.
pub const MAX_SCORE: u32 = 98;

/// 신뢰도 계산에 쓰는 고정 분모
const SCORE_DENOMINATOR: f64 = 100.0;

/// 종합 점수화 결과
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ScoreResult {
    /// 여섯 버킷 합계 (0-98)
    pub score: u32,
    /// 신뢰도 백분율 (소수점 첫째 자리)
    pub confidence: f64,
    /// 매매 액션
    pub action: Action,
    /// 추세 라벨 (액션과 독립된 임계값)
    pub trend: TrendLabel,
    /// 리스크 등급 (ATR 변동성 등급 그대로)
    pub risk: RiskLevel,
}

impl Display for ScoreResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Score({} → {:.1}%, {}, {}, {})",
            self.score, self.confidence, self.action, self.trend, self.risk
        )
    }
}

/// RSI 버킷 점수
///
/// 과매수(>70)는 낮게, 과매도(≤30)는 가장 높게 평가하는
/// 역추세 배점입니다.
fn rsi_points(rsi: f64) -> u32 {
    if rsi > 70.0 {
        5
    } else if rsi > 50.0 {
        15
    } else if rsi > 30.0 {
        10
    } else {
        18
    }
}

/// MACD 추세 버킷 점수
fn macd_points(trend: MACDTrend) -> u32 {
    match trend {
        MACDTrend::Bullish => 20,
        MACDTrend::Bearish => 5,
        MACDTrend::Neutral => 12,
    }
}

/// EMA 추세 버킷 점수
fn ema_points(trend: TrendDirection) -> u32 {
    match trend {
        TrendDirection::StrongBullish => 20,
        TrendDirection::Bullish => 15,
        TrendDirection::StrongBearish => 5,
        TrendDirection::Bearish => 8,
        TrendDirection::Neutral => 12,
    }
}

/// 볼린저 위치 버킷 점수 (하단 이탈을 매수 기회로 보는 역추세 배점)
fn bollinger_points(position: BandPosition) -> u32 {
    match position {
        BandPosition::BelowLower => 15,
        BandPosition::UpperHalf => 12,
        BandPosition::AboveUpper => 5,
        BandPosition::LowerHalf | BandPosition::Middle => 10,
    }
}

/// OBV 추세 버킷 점수
fn obv_points(trend: OBVTrend) -> u32 {
    match trend {
        OBVTrend::Accumulation => 15,
        OBVTrend::Distribution => 5,
        OBVTrend::Neutral => 10,
    }
}

/// ATR 변동성 버킷 점수
fn atr_points(volatility: Volatility) -> u32 {
    match volatility {
        Volatility::Low => 10,
        Volatility::Medium => 7,
        Volatility::High => 4,
    }
}

/// 신뢰도를 매매 액션으로 분류
///
/// 임계값: 75 이상 STRONG BUY, 60 이상 BUY, 40 이상 HOLD,
/// 25 이상 SELL, 그 외 STRONG SELL.
pub fn classify_action(confidence: f64) -> Action {
    if confidence >= 75.0 {
        Action::StrongBuy
    } else if confidence >= 60.0 {
        Action::Buy
    } else if confidence >= 40.0 {
        Action::Hold
    } else if confidence >= 25.0 {
        Action::Sell
    } else {
        Action::StrongSell
    }
}

/// 신뢰도를 추세 라벨로 분류 (액션과 별도의 임계값)
pub fn classify_trend(confidence: f64) -> TrendLabel {
    if confidence >= 70.0 {
        TrendLabel::BullishStrong
    } else if confidence >= 55.0 {
        TrendLabel::Bullish
    } else if confidence >= 45.0 {
        TrendLabel::Neutral
    } else if confidence >= 30.0 {
        TrendLabel::Bearish
    } else {
        TrendLabel::BearishStrong
    }
}

/// 지표 묶음을 종합 점수로 변환
///
/// 여섯 지표를 각각 독립 버킷으로 배점해 합산합니다.
/// 신뢰도는 고정 분모 100에 대한 백분율을 소수점 첫째 자리로
/// 반올림한 값입니다.
///
/// # Arguments
/// * `indicators` - 경계 반올림이 끝난 지표 묶음
///
/// # Returns
/// * `ScoreResult` - 점수, 신뢰도, 액션, 추세 라벨, 리스크 등급
pub fn calculate_score(indicators: &IndicatorSnapshot) -> ScoreResult {
    let score = rsi_points(indicators.rsi.value)
        + macd_points(indicators.macd.trend)
        + ema_points(indicators.ema.trend)
        + bollinger_points(indicators.bollinger.position)
        + obv_points(indicators.obv.trend)
        + atr_points(indicators.atr.volatility);

    let confidence = (score as f64 / SCORE_DENOMINATOR * 1000.0).round() / 10.0;

    let risk = match indicators.atr.volatility {
        Volatility::High => RiskLevel::High,
        Volatility::Medium => RiskLevel::Medium,
        Volatility::Low => RiskLevel::Low,
    };

    ScoreResult {
        score,
        confidence,
        action: classify_action(confidence),
        trend: classify_trend(confidence),
        risk,
    }
}
