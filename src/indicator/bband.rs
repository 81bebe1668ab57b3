use crate::indicator::utils::{calculate_mean, calculate_std_dev, round2};
use serde::Serialize;
use std::fmt::Display;

/// 밴드 대비 현재가 위치
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    /// 상단 밴드 위
    AboveUpper,
    /// 하단 밴드 아래
    BelowLower,
    /// 중간선과 상단 밴드 사이
    UpperHalf,
    /// 중간선 이하
    LowerHalf,
    /// 데이터 부족 폴백
    Middle,
}

impl Display for BandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BandPosition::AboveUpper => write!(f, "above_upper"),
            BandPosition::BelowLower => write!(f, "below_lower"),
            BandPosition::UpperHalf => write!(f, "upper_half"),
            BandPosition::LowerHalf => write!(f, "lower_half"),
            BandPosition::Middle => write!(f, "middle"),
        }
    }
}

/// 볼린저 밴드 기술적 지표
///
/// 마지막 `period`개 종가의 단순 평균을 중간선으로 하고,
/// 모집단 표준편차의 배수만큼 상단/하단 밴드를 둡니다.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// 밴드 대비 현재가 위치
    pub position: BandPosition,
    /// 밴드 폭 비율: (상단 - 하단) / 중간선 * 100
    pub bandwidth: f64,
}

impl Display for BollingerBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BBand(하단: {:.2}, 중간: {:.2}, 상단: {:.2}, 위치: {})",
            self.lower, self.middle, self.upper, self.position
        )
    }
}

impl BollingerBands {
    /// 종가 배열에서 볼린저 밴드 계산
    ///
    /// 데이터가 `period`개 미만이면 현재가 ±2% 폴백 밴드를 반환합니다.
    /// 폴백 값은 반올림하지 않고, 계산 분기의 출력만 소수점 둘째
    /// 자리로 반올림합니다. 위치 판정은 반올림 전 값으로 수행합니다.
    ///
    /// # Arguments
    /// * `closes` - 종가 배열 (과거→현재)
    /// * `period` - 계산 기간 (일반적으로 20)
    /// * `multiplier` - 표준편차 승수 (일반적으로 2)
    ///
    /// # Returns
    /// * `BollingerBands` - 계산된 밴드
    pub fn calculate(closes: &[f64], period: usize, multiplier: f64) -> BollingerBands {
        let current = closes.last().copied().unwrap_or(0.0);

        if closes.len() < period {
            return BollingerBands {
                upper: current * 1.02,
                middle: current,
                lower: current * 0.98,
                position: BandPosition::Middle,
                bandwidth: 4.0,
            };
        }

        let window = &closes[closes.len() - period..];
        let middle = calculate_mean(window);
        let std_dev = calculate_std_dev(window);

        let upper = middle + multiplier * std_dev;
        let lower = middle - multiplier * std_dev;

        let position = if current > upper {
            BandPosition::AboveUpper
        } else if current < lower {
            BandPosition::BelowLower
        } else if current > middle {
            BandPosition::UpperHalf
        } else {
            BandPosition::LowerHalf
        };

        let bandwidth = (upper - lower) / middle * 100.0;

        BollingerBands {
            upper: round2(upper),
            middle: round2(middle),
            lower: round2(lower),
            position,
            bandwidth: round2(bandwidth),
        }
    }
}
