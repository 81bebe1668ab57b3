use crate::indicator::IndicatorSnapshot;
use crate::indicator::utils::round2;
use crate::model::Action;
use serde::Serialize;
use std::fmt::Display;

/// 액션에 따라 산출된 트레이딩 레벨
///
/// 모든 값은 입력 가격과 같은 통화 단위이며 소수점 둘째 자리로
/// 반올림됩니다.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct TradingLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub take_profit_3: f64,
    pub support: f64,
    pub resistance: f64,
}

impl Display for TradingLevels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Levels(진입: {:.2}, 손절: {:.2}, 목표: {:.2}/{:.2}/{:.2})",
            self.entry, self.stop_loss, self.take_profit_1, self.take_profit_2, self.take_profit_3
        )
    }
}

/// 현재가, 지표 묶음, 액션으로부터 트레이딩 레벨 산출
///
/// - 진입가: 매수 계열이면 현재가의 99.5%, 그 외 현재가.
/// - 손절가: 매수 계열과 HOLD는 아래쪽 경계 세 개(현재가 - 2·ATR,
///   볼린저 하단, 단기 EMA의 95%) 중 가장 높은 값, 매도 계열은
///   위쪽 경계 세 개 중 가장 낮은 값.
/// - 목표가: |현재가 - 손절가|의 1.5/2/3배를 매수 계열이면 더하고
///   그 외(HOLD 포함)에는 뺍니다. HOLD가 손절은 매수 쪽, 목표는
///   매도 쪽을 따르는 것은 정의된 동작입니다.
/// - 지지/저항: 액션과 무관하게 볼린저 밴드와 중기 EMA로 산출.
///
/// # Arguments
/// * `current_price` - 현재가 (반올림 전 원값)
/// * `indicators` - 경계 반올림이 끝난 지표 묶음
/// * `action` - 점수화로 결정된 매매 액션
pub fn calculate_trading_levels(
    current_price: f64,
    indicators: &IndicatorSnapshot,
    action: Action,
) -> TradingLevels {
    let atr = indicators.atr.atr;
    let bband = &indicators.bollinger;
    let ema = &indicators.ema;

    let entry = if action.is_buy_side() {
        current_price * 0.995
    } else {
        current_price
    };

    let stop_loss = if action.is_buy_side() || action == Action::Hold {
        (current_price - atr * 2.0)
            .max(bband.lower)
            .max(ema.ema_20 * 0.95)
    } else {
        (current_price + atr * 2.0)
            .min(bband.upper)
            .min(ema.ema_20 * 1.05)
    };

    let risk = (current_price - stop_loss).abs();

    let (tp1, tp2, tp3) = if action.is_buy_side() {
        (
            current_price + risk * 1.5,
            current_price + risk * 2.0,
            current_price + risk * 3.0,
        )
    } else {
        (
            current_price - risk * 1.5,
            current_price - risk * 2.0,
            current_price - risk * 3.0,
        )
    };

    let support = bband.lower.min(ema.ema_50 * 0.95);
    let resistance = bband.upper.max(ema.ema_50 * 1.05);

    TradingLevels {
        entry: round2(entry),
        stop_loss: round2(stop_loss),
        take_profit_1: round2(tp1),
        take_profit_2: round2(tp2),
        take_profit_3: round2(tp3),
        support: round2(support),
        resistance: round2(resistance),
    }
}
