use crate::indicator::utils::{calculate_mean, round2};
use serde::Serialize;
use std::fmt::Display;

/// ATR 비율 기반 변동성 등급
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Volatility::Low => write!(f, "low"),
            Volatility::Medium => write!(f, "medium"),
            Volatility::High => write!(f, "high"),
        }
    }
}

/// 평균 진폭(ATR) 기술적 지표
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ATR {
    /// ATR 값 (소수점 둘째 자리 반올림)
    pub atr: f64,
    /// 현재가 대비 ATR 비율 (%, 소수점 둘째 자리 반올림)
    pub atr_percent: f64,
    /// 변동성 등급
    pub volatility: Volatility,
}

impl Display for ATR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ATR({:.2}, {:.2}%, {})",
            self.atr, self.atr_percent, self.volatility
        )
    }
}

impl ATR {
    /// 고가/저가/종가 배열에서 ATR 계산
    ///
    /// 각 캔들의 진폭은 고가-저가, |고가-이전 종가|, |저가-이전 종가|
    /// 중 최댓값이며, ATR은 마지막 `period`개 진폭의 단순 평균입니다.
    /// 변동성 등급은 반올림 전 비율로 판정합니다:
    /// 3 초과 → high, 1 초과 → medium, 그 외 low (정확히 3.0은 medium).
    ///
    /// 데이터가 `period + 1`개 미만이면 0 값과 low 등급을 반환합니다.
    ///
    /// # Arguments
    /// * `high` - 고가 배열 (과거→현재)
    /// * `low` - 저가 배열
    /// * `close` - 종가 배열
    /// * `period` - 계산 기간 (일반적으로 14)
    pub fn calculate(high: &[f64], low: &[f64], close: &[f64], period: usize) -> ATR {
        if high.len() < period + 1 {
            return ATR {
                atr: 0.0,
                atr_percent: 0.0,
                volatility: Volatility::Low,
            };
        }

        let mut tr_values = Vec::with_capacity(high.len() - 1);
        for i in 1..high.len() {
            let tr = (high[i] - low[i])
                .max((high[i] - close[i - 1]).abs())
                .max((low[i] - close[i - 1]).abs());
            tr_values.push(tr);
        }

        let atr = calculate_mean(&tr_values[tr_values.len() - period..]);
        let current = close.last().copied().unwrap_or(0.0);
        let atr_percent = atr / current * 100.0;

        let volatility = if atr_percent > 3.0 {
            Volatility::High
        } else if atr_percent > 1.0 {
            Volatility::Medium
        } else {
            Volatility::Low
        };

        ATR {
            atr: round2(atr),
            atr_percent: round2(atr_percent),
            volatility,
        }
    }
}
