//! Basic packing example

use structpack_core::{calc_length, pack, unpack, Mode, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Structpack Basic Packing Example\n");

    // Network-order header: version, flags, payload length, sequence number, name
    let format = "!BBHQ6s";
    let values = vec![
        Value::from(1u8),
        Value::from(0b1010u8),
        Value::from(512u16),
        Value::from(u64::MAX),
        Value::from("probe"),
    ];

    println!("Format {} covers {} bytes", format, calc_length(format)?);

    let bytes = pack(format, &values, Mode::Strict)?;
    println!("Packed: {:02x?}", &bytes[..]);

    let decoded = unpack(format, &bytes, Mode::Strict)?;
    for (i, value) in decoded.iter().enumerate() {
        println!("  [{}] {:?}", i, value);
    }

    std::fs::write("example_header.bin", &bytes)?;
    println!("\nWrote {} bytes to example_header.bin", bytes.len());
    println!("Use 'structpack unpack -f {} -i example_header.bin' to read it back", format);

    Ok(())
}
