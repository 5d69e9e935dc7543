use snailtimer_core::Config;

use crate::remote;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let api = remote::require_client(&Config::load_or_default())?;
    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(api.current_user())? {
        Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
        None => println!("not signed in"),
    }
    Ok(())
}
