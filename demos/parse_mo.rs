use std::io::{self, Read};

use eel_client::Mo;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut xml = String::new();
    io::stdin().read_to_string(&mut xml)?;

    let mo = Mo::from_xml(&xml)?;
    for (field, value) in mo.attributes() {
        println!("{field}: {}", value.unwrap_or_default());
    }
    Ok(())
}
