use chrono::{Local, Utc};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let core = super::open_core()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let insights = runtime.block_on(core.insights(Utc::now(), &Local));
    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}
