use coroot_constructor::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	app::start().await?;
	Ok(())
}
