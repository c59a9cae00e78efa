//! Recovering the readable prefix of a truncated record stream

use structpack_core::{Layout, Mode, StructError, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Structpack Loose Mode Example\n");

    let layout = Layout::parse("<IhxB4s")?;
    let record = layout.pack(
        &[
            Value::from(123_456u32),
            Value::from(-12i16),
            Value::from(3u8),
            Value::from("tag!"),
        ],
        Mode::Strict,
    )?;
    println!("Full record: {} bytes", record.len());

    // Simulate a short read
    for cut in [record.len(), 8, 5, 3] {
        let partial = &record[..cut];
        match layout.unpack(partial, Mode::Strict) {
            Ok(values) => println!("{:>2} bytes strict: {:?}", cut, values),
            Err(StructError::NotEnoughBytes { needed, available }) => {
                let prefix = layout.unpack(partial, Mode::Loose)?;
                println!(
                    "{:>2} bytes strict failed ({} of {}), loose recovered {:?}",
                    cut, available, needed, prefix
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Missing values: strict refuses, loose keeps whole groups only
    let short = [Value::from(1u32), Value::from(2i16)];
    println!("\nStrict pack with 2 values: {:?}", layout.pack(&short, Mode::Strict));
    println!("Loose pack with 2 values:  {:02x?}", &layout.pack(&short, Mode::Loose)?[..]);

    Ok(())
}
