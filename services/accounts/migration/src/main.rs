#[tokio::main]
async fn main() {
    sea_orm_migration::cli::run_cli(accounts_migration::Migrator).await;
}
