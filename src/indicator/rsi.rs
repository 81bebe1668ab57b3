use crate::indicator::utils::round2;
use serde::Serialize;
use std::fmt::Display;

/// 상대강도지수(RSI) 기술적 지표
///
/// 최근 상승폭과 하락폭의 상대 강도를 0~100 범위로 나타냅니다.
/// 데이터가 `period + 1`개 미만이면 중립값 50을 반환합니다.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(transparent)]
pub struct RSI {
    /// RSI 계산 기간
    #[serde(skip)]
    pub period: usize,
    /// RSI 값 (0-100, 소수점 둘째 자리 반올림)
    pub value: f64,
}

impl Display for RSI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}: {:.2})", self.period, self.value)
    }
}

impl RSI {
    /// 종가 배열에서 RSI 계산
    ///
    /// 전체 구간의 1차 차분 중 마지막 `period`개만 사용하며,
    /// 평균 상승/하락폭은 단순 평균입니다 (Wilder 평활 아님).
    /// 평균 하락폭이 정확히 0이면 100을 반환합니다. 차분이 전부 0인
    /// 상수 시계열도 이 분기로 들어가 100이 됩니다.
    ///
    /// # Arguments
    /// * `closes` - 종가 배열 (과거→현재)
    /// * `period` - 계산 기간 (일반적으로 14)
    ///
    /// # Returns
    /// * `RSI` - 계산된 지표 (데이터 부족 시 50)
    pub fn calculate(closes: &[f64], period: usize) -> RSI {
        if closes.len() < period + 1 {
            return RSI {
                period,
                value: 50.0,
            };
        }

        let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
        let recent = &deltas[deltas.len() - period..];

        let avg_gain =
            recent.iter().filter(|d| **d > 0.0).sum::<f64>() / period as f64;
        let avg_loss =
            -recent.iter().filter(|d| **d < 0.0).sum::<f64>() / period as f64;

        if avg_loss == 0.0 {
            return RSI {
                period,
                value: 100.0,
            };
        }

        let rs = avg_gain / avg_loss;
        RSI {
            period,
            value: round2(100.0 - 100.0 / (1.0 + rs)),
        }
    }

    /// 과매수 상태인지 확인
    ///
    /// # Arguments
    /// * `threshold` - 과매수 기준값 (기본값 70.0)
    pub fn is_overbought(&self, threshold: Option<f64>) -> bool {
        self.value >= threshold.unwrap_or(70.0)
    }

    /// 과매도 상태인지 확인
    ///
    /// # Arguments
    /// * `threshold` - 과매도 기준값 (기본값 30.0)
    pub fn is_oversold(&self, threshold: Option<f64>) -> bool {
        self.value <= threshold.unwrap_or(30.0)
    }
}
