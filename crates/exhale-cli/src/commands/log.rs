pub fn craving(context: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut core = super::open_core()?;
    let event = core.handle_craving(context)?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}

pub fn smoke(count: u32, context: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut core = super::open_core()?;
    let event = core.record_smoking(count, context)?;
    println!("{}", serde_json::to_string_pretty(&event)?);
    Ok(())
}
