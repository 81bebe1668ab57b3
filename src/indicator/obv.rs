use serde::Serialize;
use std::fmt::Display;

/// OBV 누적 흐름 추세
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OBVTrend {
    /// 매집 (누적 거래량 증가)
    Accumulation,
    /// 분산 (누적 거래량 감소)
    Distribution,
    Neutral,
}

impl Display for OBVTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OBVTrend::Accumulation => write!(f, "accumulation"),
            OBVTrend::Distribution => write!(f, "distribution"),
            OBVTrend::Neutral => write!(f, "neutral"),
        }
    }
}

/// 누적 거래량(OBV) 기술적 지표
#[derive(Clone, Copy, Debug, Serialize)]
pub struct OBV {
    /// 누적 거래량 마지막 값 (정수 반올림)
    pub obv: f64,
    /// 누적 흐름 추세
    pub trend: OBVTrend,
}

impl Display for OBV {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OBV({:.0}, {})", self.obv, self.trend)
    }
}

impl OBV {
    /// 종가/거래량 배열에서 OBV 계산
    ///
    /// 0에서 시작하는 누적 합으로, 종가가 오르면 해당 거래량을 더하고
    /// 내리면 빼고 같으면 유지합니다. 추세는 누적 시퀀스가 10개
    /// 이상일 때만 마지막 10개 구간의 처음과 끝을 비교해 판정하며,
    /// 그보다 짧으면 방향과 무관하게 neutral입니다.
    ///
    /// # Arguments
    /// * `close` - 종가 배열 (과거→현재)
    /// * `volume` - 거래량 배열
    pub fn calculate(close: &[f64], volume: &[f64]) -> OBV {
        if close.len() < 2 {
            return OBV {
                obv: 0.0,
                trend: OBVTrend::Neutral,
            };
        }

        let mut running = Vec::with_capacity(close.len());
        running.push(0.0);
        for i in 1..close.len() {
            let prev = running[i - 1];
            let next = if close[i] > close[i - 1] {
                prev + volume[i]
            } else if close[i] < close[i - 1] {
                prev - volume[i]
            } else {
                prev
            };
            running.push(next);
        }

        let mut trend = OBVTrend::Neutral;
        if running.len() >= 10 {
            let recent = &running[running.len() - 10..];
            if recent[9] > recent[0] {
                trend = OBVTrend::Accumulation;
            } else if recent[9] < recent[0] {
                trend = OBVTrend::Distribution;
            }
        }

        OBV {
            obv: running.last().copied().unwrap_or(0.0).round(),
            trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obv_single_point_is_neutral() {
        let obv = OBV::calculate(&[100.0], &[1000.0]);
        assert_eq!(obv.obv, 0.0);
        assert_eq!(obv.trend, OBVTrend::Neutral);
    }

    #[test]
    fn test_obv_known_cumulative_value() {
        let close = vec![1.0, 2.0, 1.0, 1.0, 3.0];
        let volume = vec![10.0, 10.0, 10.0, 10.0, 10.0];
        let obv = OBV::calculate(&close, &volume);
        // +10, -10, 0, +10 → 10
        assert_eq!(obv.obv, 10.0);
    }

    #[test]
    fn test_obv_trend_needs_ten_points() {
        // 9개짜리 강한 상승도 추세는 neutral
        let close: Vec<f64> = (1..=9).map(|v| v as f64).collect();
        let volume = vec![1000.0; 9];
        let obv = OBV::calculate(&close, &volume);
        assert_eq!(obv.trend, OBVTrend::Neutral);
        assert_eq!(obv.obv, 8000.0);
    }

    #[test]
    fn test_obv_accumulation() {
        let close: Vec<f64> = (1..=20).map(|v| v as f64).collect();
        let volume = vec![1000.0; 20];
        let obv = OBV::calculate(&close, &volume);
        assert_eq!(obv.trend, OBVTrend::Accumulation);
    }

    #[test]
    fn test_obv_distribution() {
        let close: Vec<f64> = (1..=20).rev().map(|v| v as f64).collect();
        let volume = vec![1000.0; 20];
        let obv = OBV::calculate(&close, &volume);
        assert_eq!(obv.trend, OBVTrend::Distribution);
        assert!(obv.obv < 0.0);
    }

    #[test]
    fn test_obv_flat_series_is_neutral() {
        let close = vec![100.0; 20];
        let volume = vec![1000.0; 20];
        let obv = OBV::calculate(&close, &volume);
        assert_eq!(obv.obv, 0.0);
        assert_eq!(obv.trend, OBVTrend::Neutral);
    }
}
