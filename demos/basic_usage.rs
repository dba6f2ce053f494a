//! Basic usage example for wxhelper-sdk
//!
//! Run with: VIRTUAL_MACHINE_URL=http://127.0.0.1:19088 cargo run --example basic_usage

use std::time::Duration;

use wxhelper_sdk::types::HookSyncMsgOption;
use wxhelper_sdk::WxClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = WxClient::from_env()?;

    if !client.check_login().await? {
        println!("WeChat is not logged in");
        return Ok(());
    }

    let me = client.get_user_info().await?;
    println!("Logged in as {} ({})", me.name, me.wxid);

    let contacts = client.get_contact_list().await?;
    println!("{} contacts", contacts.len());

    let opt = HookSyncMsgOption::parse("http://127.0.0.1:8000/callback", Duration::from_secs(30))?;
    client.http_hook_sync_msg(&opt).await?;
    println!("Message hook registered");

    Ok(())
}
