use log::{debug, error, info, warn};
use std::env;
use std::path::PathBuf;
use trading_analysis::analysis::AnalysisConfig;
use trading_analysis::symbol_catalog::SymbolCatalog;

fn main() {
    // 로그 초기화
    env_logger::init();

    info!("분석 설정 로더 시작");

    // 커맨드 라인 인수 파싱
    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    // 설정 파일 경로 (지정되지 않은 경우 기본 경로 사용)
    let config_path = if args.len() >= 2 {
        debug!("사용자 지정 설정 파일 사용: {}", args[1]);
        PathBuf::from(&args[1])
    } else {
        let path = AnalysisConfig::default_config_path();
        debug!("기본 설정 파일 경로 사용: {}", path.display());
        path
    };

    if !config_path.exists() {
        warn!("설정 파일이 존재하지 않습니다: {}", config_path.display());
        println!(
            "경고: 설정 파일이 존재하지 않습니다: {}",
            config_path.display()
        );
        println!("사용법: {} [설정_파일_경로] [카탈로그_파일_경로]", args[0]);
        println!("기본 설정으로 계속합니다.");
    }

    println!("설정 파일: {}", config_path.display());

    // 설정 파일 로드 (없으면 기본값)
    let config = if config_path.exists() {
        match AnalysisConfig::from_file(&config_path) {
            Ok(config) => {
                info!("설정 로드 성공");
                config
            }
            Err(err) => {
                let error_msg = format!("설정 로드 실패: {err}");
                error!("{error_msg}");
                println!("{error_msg}");

                // 에러 종류에 따라 추가 정보 제공
                let message = err.to_string();
                if message.contains("파일 읽기 실패") {
                    println!("해결 방법: 설정 파일 경로를 확인하세요.");
                } else if message.contains("파싱") {
                    println!("해결 방법: 설정 파일 형식이 올바른지 확인하세요.");
                } else if message.contains("유효성 검사") {
                    println!("해결 방법: 설정 값이 유효 범위 내에 있는지 확인하세요.");
                }
                return;
            }
        }
    } else {
        AnalysisConfig::default()
    };

    println!("RSI 기간: {}", config.rsi.period);
    println!(
        "볼린저: 기간 {}, 승수 {}",
        config.bollinger.period, config.bollinger.multiplier
    );
    println!(
        "MACD: {}/{}/{}",
        config.macd.fast_period, config.macd.slow_period, config.macd.signal_period
    );
    println!(
        "EMA: {}/{}/{}",
        config.ema.short_period, config.ema.mid_period, config.ema.long_period
    );
    println!("ATR 기간: {}", config.atr.period);

    // 카탈로그 파일이 지정되면 로드, 아니면 내장 기본값
    let catalog = if args.len() >= 3 {
        let catalog_path = PathBuf::from(&args[2]);
        match SymbolCatalog::from_file(&catalog_path) {
            Ok(catalog) => catalog,
            Err(err) => {
                error!("카탈로그 로드 실패: {err}");
                println!("카탈로그 로드 실패: {err}");
                return;
            }
        }
    } else {
        SymbolCatalog::default_catalog().clone()
    };

    println!("심볼 카탈로그: {}개 그룹, {}개 심볼", catalog.groups.len(), catalog.len());
    for group in &catalog.groups {
        println!("  [{}] {}", group.name, group.symbols.join(", "));
    }

    info!("분석 설정 로더 종료");
}
