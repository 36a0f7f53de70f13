mod cli;
mod demo;
mod server;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
