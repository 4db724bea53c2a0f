use budgeteer_core::{cli::run_cli, init};

#[tokio::main]
async fn main() {
    init();

    if let Err(err) = run_cli().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
