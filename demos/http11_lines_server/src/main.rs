//! http11_lines を使った HTTP サーバーの例 (tokio)
//!
//! 使い方:
//!   # HTTP サーバー (ポート 6969)
//!   cargo run -p http11_lines_server
//!
//!   # 1 回の read で 4096 バイトまで読む
//!   cargo run -p http11_lines_server -- --chunk-size 4096
//!
//!   # ファイルに保存したリクエストをパースして表示
//!   cargo run -p http11_lines_server -- --file request.txt
//!
//! ログレベルは RUST_LOG で指定する (デフォルト: info)

use std::fs::File;
use std::time::Duration;

use http11_lines::{ParserConfig, Request, Response, parse_request};
use tokio_http11_lines::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct ServerOptions {
    host: String,
    port: u16,
    chunk_size: usize,
    read_timeout: Option<Duration>,
    file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ParserConfig::default().read_chunk_size(options.chunk_size);

    if let Some(path) = &options.file {
        return print_request_file(path, config);
    }

    let addr = format!("{}:{}", options.host, options.port);
    let server = Server::bind(&addr)
        .await?
        .read_timeout(options.read_timeout)
        .parser_config(config);

    tracing::info!("HTTP server listening on http://{}", server.local_addr()?);
    server.serve(handle).await?;

    Ok(())
}

async fn handle(request: Request) -> Response {
    tracing::debug!(?request, "handling request");
    Response::for_request(&request, 200)
}

fn print_request_file(path: &str, config: ParserConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    match parse_request(file, config)? {
        Some(request) => {
            println!("{}", request);
            let mut names: Vec<&String> = request.headers().keys().collect();
            names.sort();
            for name in names {
                let value = request.header(name).unwrap_or_default();
                println!("{}:{}", name, String::from_utf8_lossy(value));
            }
        }
        None => println!("no request in {}", path),
    }
    Ok(())
}

fn parse_args() -> Result<ServerOptions, Box<dyn std::error::Error>> {
    let mut args = noargs::raw_args();
    args.metadata_mut().app_name = "http11_lines_server";

    // --help フラグ
    noargs::HELP_FLAG.take_help(&mut args);

    // --version フラグ
    let version_flag: bool = noargs::flag("version")
        .short('V')
        .doc("Show version")
        .take(&mut args)
        .is_present();
    if version_flag {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    // --host オプション
    let host: String = noargs::opt("host")
        .doc("Address to listen on")
        .default("0.0.0.0")
        .take(&mut args)
        .then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // --port オプション
    let port: u16 = noargs::opt("port")
        .short('p')
        .doc("Port to listen on")
        .default("6969")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --chunk-size オプション
    let chunk_size: usize = noargs::opt("chunk-size")
        .doc("Bytes requested per read")
        .default("1")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --read-timeout オプション (0 で無効)
    let read_timeout_secs: u64 = noargs::opt("read-timeout")
        .doc("Seconds to wait for a complete request (0 disables)")
        .default("60")
        .take(&mut args)
        .then(|o| o.value().parse())
        .map_err(|e| format!("{:?}", e))?;

    // --file オプション
    let file: Option<String> = noargs::opt("file")
        .doc("Parse a request stored in a file and print it")
        .take(&mut args)
        .present_and_then(|o| Ok::<_, &str>(o.value().to_string()))
        .map_err(|e| format!("{:?}", e))?;

    // 未知の引数があればエラー、ヘルプが返されたら表示
    if let Some(help) = args.finish().map_err(|e| format!("{:?}", e))? {
        print!("{}", help);
        std::process::exit(0);
    }

    let read_timeout = (read_timeout_secs > 0).then(|| Duration::from_secs(read_timeout_secs));

    Ok(ServerOptions {
        host,
        port,
        chunk_size,
        read_timeout,
        file,
    })
}
