use trading_analysis::model::PriceSeries;

/// 종가가 일정한 시계열 생성 (고가/저가도 동일, 거래량 1000)
pub fn constant_series(count: usize, price: f64) -> PriceSeries {
    PriceSeries::new(
        vec![price; count],
        vec![price; count],
        vec![price; count],
        vec![1000.0; count],
    )
    .unwrap()
}

/// 종가가 매 캔들 `step`씩 오르는 시계열 생성
pub fn uptrend_series(count: usize, base_price: f64, step: f64) -> PriceSeries {
    let close: Vec<f64> = (0..count).map(|i| base_price + i as f64 * step).collect();
    let high: Vec<f64> = close.iter().map(|c| c + step).collect();
    let low: Vec<f64> = close.iter().map(|c| c - step).collect();
    let volume = vec![1000.0; count];
    PriceSeries::new(close, high, low, volume).unwrap()
}

/// 종가가 매 캔들 `step`씩 내리는 시계열 생성
pub fn downtrend_series(count: usize, base_price: f64, step: f64) -> PriceSeries {
    let close: Vec<f64> = (0..count).map(|i| base_price - i as f64 * step).collect();
    let high: Vec<f64> = close.iter().map(|c| c + step).collect();
    let low: Vec<f64> = close.iter().map(|c| c - step).collect();
    let volume = vec![1000.0; count];
    PriceSeries::new(close, high, low, volume).unwrap()
}

/// 종가 배열만으로 시계열 생성 (고가/저가는 종가, 거래량 0)
pub fn closes_only(close: Vec<f64>) -> PriceSeries {
    PriceSeries::from_closes(close).unwrap()
}
