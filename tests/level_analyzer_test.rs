use trading_analysis::analyzer::level_analyzer::calculate_trading_levels;
use trading_analysis::indicator::IndicatorSnapshot;
use trading_analysis::indicator::atr::{ATR, Volatility};
use trading_analysis::indicator::bband::{BandPosition, BollingerBands};
use trading_analysis::indicator::ema_trend::{EMATrend, TrendDirection};
use trading_analysis::indicator::macd::{MACD, MACDTrend};
use trading_analysis::indicator::obv::{OBV, OBVTrend};
use trading_analysis::indicator::rsi::RSI;
use trading_analysis::model::Action;

/// 레벨 계산에 쓰이는 값만 지정한 지표 묶음 구성
fn snapshot(atr: f64, bb_lower: f64, bb_upper: f64, ema_20: f64, ema_50: f64) -> IndicatorSnapshot {
    IndicatorSnapshot {
        rsi: RSI {
            period: 14,
            value: 50.0,
        },
        bollinger: BollingerBands {
            upper: bb_upper,
            middle: (bb_upper + bb_lower) / 2.0,
            lower: bb_lower,
            position: BandPosition::LowerHalf,
            bandwidth: 4.0,
        },
        macd: MACD {
            macd: 0.0,
            signal: 0.0,
            histogram: 0.0,
            trend: MACDTrend::Neutral,
        },
        ema: EMATrend {
            ema_20,
            ema_50,
            ema_200: ema_50,
            current_price: 100.0,
            trend: TrendDirection::Neutral,
        },
        atr: ATR {
            atr,
            atr_percent: atr,
            volatility: Volatility::Medium,
        },
        obv: OBV {
            obv: 0.0,
            trend: OBVTrend::Neutral,
        },
    }
}

#[test]
fn test_buy_levels_known_values() {
    let snapshot = snapshot(2.0, 95.0, 105.0, 100.0, 100.0);
    let levels = calculate_trading_levels(100.0, &snapshot, Action::Buy);

    // 손절 = max(100 - 4, 95, 95) = 96, 리스크 = 4
    assert_eq!(levels.entry, 99.5);
    assert_eq!(levels.stop_loss, 96.0);
    assert_eq!(levels.take_profit_1, 106.0);
    assert_eq!(levels.take_profit_2, 108.0);
    assert_eq!(levels.take_profit_3, 112.0);
    assert_eq!(levels.support, 95.0);
    assert_eq!(levels.resistance, 105.0);
}

#[test]
fn test_sell_levels_known_values() {
    let snapshot = snapshot(2.0, 95.0, 105.0, 100.0, 100.0);
    let levels = calculate_trading_levels(100.0, &snapshot, Action::Sell);

    // 손절 = min(100 + 4, 105, 105) = 104, 리스크 = 4
    assert_eq!(levels.entry, 100.0);
    assert_eq!(levels.stop_loss, 104.0);
    assert_eq!(levels.take_profit_1, 94.0);
    assert_eq!(levels.take_profit_2, 92.0);
    assert_eq!(levels.take_profit_3, 88.0);
}

#[test]
fn test_buy_side_level_ordering() {
    let snapshot = snapshot(3.0, 90.0, 110.0, 98.0, 97.0);
    for action in [Action::StrongBuy, Action::Buy] {
        let levels = calculate_trading_levels(100.0, &snapshot, action);
        assert!(levels.entry < 100.0);
        assert!(levels.stop_loss < 100.0);
        assert!(levels.take_profit_1 > 100.0);
        assert!(levels.take_profit_1 < levels.take_profit_2);
        assert!(levels.take_profit_2 < levels.take_profit_3);
    }
}

#[test]
fn test_sell_side_level_ordering() {
    let snapshot = snapshot(3.0, 90.0, 110.0, 98.0, 97.0);
    for action in [Action::Sell, Action::StrongSell] {
        let levels = calculate_trading_levels(100.0, &snapshot, action);
        assert_eq!(levels.entry, 100.0);
        assert!(levels.stop_loss > 100.0);
        assert!(levels.take_profit_1 < 100.0);
        assert!(levels.take_profit_1 > levels.take_profit_2);
        assert!(levels.take_profit_2 > levels.take_profit_3);
    }
}

#[test]
fn test_hold_uses_buy_stop_and_sell_targets() {
    // HOLD는 손절은 매수 쪽 경계, 목표가는 매도 쪽 방향을 따른다
    let snapshot = snapshot(2.0, 95.0, 105.0, 100.0, 100.0);
    let levels = calculate_trading_levels(100.0, &snapshot, Action::Hold);

    assert_eq!(levels.entry, 100.0);
    assert_eq!(levels.stop_loss, 96.0);
    assert_eq!(levels.take_profit_1, 94.0);
    assert_eq!(levels.take_profit_2, 92.0);
    assert_eq!(levels.take_profit_3, 88.0);
}

#[test]
fn test_support_resistance_independent_of_action() {
    let snapshot = snapshot(2.0, 95.0, 105.0, 100.0, 102.0);
    let buy = calculate_trading_levels(100.0, &snapshot, Action::Buy);
    let sell = calculate_trading_levels(100.0, &snapshot, Action::StrongSell);

    // 지지 = min(95, 102*0.95 = 96.9) = 95, 저항 = max(105, 107.1) = 107.1
    assert_eq!(buy.support, sell.support);
    assert_eq!(buy.resistance, sell.resistance);
    assert_eq!(buy.support, 95.0);
    assert_eq!(buy.resistance, 107.1);
}

#[test]
fn test_tight_stop_bound_wins() {
    // 볼린저 하단이 더 타이트하면 손절로 선택된다
    let snapshot = snapshot(10.0, 99.0, 101.0, 90.0, 90.0);
    let levels = calculate_trading_levels(100.0, &snapshot, Action::Buy);
    // max(100 - 20, 99, 85.5) = 99
    assert_eq!(levels.stop_loss, 99.0);
}
