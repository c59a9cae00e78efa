use anyhow::{Context, Result};
use structpack_core::{ByteOrder, Layout};
use tracing::info;

pub fn execute(format: &str, show_fields: bool) -> Result<()> {
    let layout =
        Layout::parse(format).with_context(|| format!("Invalid format string: {:?}", format))?;

    info!("Parsed {} fields from {:?}", layout.fields().len(), format);

    println!("{}", layout.calc_length());

    if show_fields {
        println!("\n=== Fields ===");
        let mut offset = 0;
        for field in layout.fields() {
            let order = match field.order {
                ByteOrder::Little => "little",
                ByteOrder::Big => "big",
            };
            println!(
                "@{:<6} {:>6} x '{}'  {:>3} bytes each  {}",
                offset,
                field.count,
                field.code.as_char(),
                field.size,
                order
            );
            offset += field.byte_len();
        }
        println!("Values consumed:  {}", layout.value_count());
    }

    Ok(())
}
