// 기술적 분석 지표 모듈
// 각 지표는 입력 배열에 대한 순수 함수이며, 데이터가 부족하면
// 문서화된 중립/폴백 값을 반환합니다.

pub mod atr;
pub mod bband;
pub mod ema_trend;
pub mod ma;
pub mod macd;
pub mod obv;
pub mod rsi;
pub mod utils;

use serde::Serialize;
use std::fmt::Display;

use atr::ATR;
use bband::BollingerBands;
use ema_trend::EMATrend;
use macd::MACD;
use obv::OBV;
use rsi::RSI;

/// 한 번의 분석 호출로 생성되는 전체 지표 묶음
///
/// 항상 통째로 새로 만들어지며 부분 갱신되지 않습니다.
/// 각 필드는 이미 경계 반올림이 적용된 공개 결과입니다.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct IndicatorSnapshot {
    pub rsi: RSI,
    pub bollinger: BollingerBands,
    pub macd: MACD,
    pub ema: EMATrend,
    pub atr: ATR,
    pub obv: OBV,
}

impl Display for IndicatorSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.rsi, self.macd, self.ema, self.bollinger, self.atr, self.obv
        )
    }
}
