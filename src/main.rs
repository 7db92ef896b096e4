use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use huffman_codes::{least_bytes_repr_for_bits, statistics, HuffmanCodec};


const DEMO_TEXT: &str = "Huffman codes compress data very effectively: savings of 20% to 90% are typical, \
    depending on the characteristics of the data being compressed. 中华崛起";


#[derive(Parser, Debug)]
#[command(about = "Huffman-encode a text and decode it back")]
struct Args {
    /// Text to encode. A built-in sample is used when neither this nor --file is given
    text: Option<String>,
    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
    /// Print the codeword of every symbol
    #[arg(short, long)]
    table: bool,
    /// Print the UTF-8 and UTF-16 bits of the text for comparison
    #[arg(short, long)]
    raw: bool,
    /// Print the size of the encoded stream as padded bytes
    #[arg(short, long)]
    bytes: bool,
}


/// Renders bytes as bits, most significant first.
fn byte_bits(bytes: impl IntoIterator<Item = u8>) -> String {
    bytes.into_iter()
        .map(|byte| format!("{byte:08b}"))
        .collect()
}


fn run(args: Args) -> Result<(), String> {

    let text = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .map_err(|e| format!("Could not read file {}: {e}", path.display()))?,
        (None, None) => DEMO_TEXT.to_owned()
    };

    let table = statistics(text.chars());
    let codec = HuffmanCodec::new(&table);

    let encoded = codec.encode(text.chars())
        .map_err(|e| format!("Failed to encode: {e}"))?;

    let decoded: String = codec.decode(&encoded)
        .map_err(|e| format!("Failed to decode: {e}"))?
        .into_iter()
        .collect();

    if decoded != text {
        return Err("Decoded text differs from the original".to_owned());
    }

    println!("Original string: {text}");
    println!("Huffman encoded binary string: {encoded}");
    println!("Decoded string from binary string: {decoded}");

    if args.table {
        println!("Codewords:");
        for (symbol, codeword) in codec.codewords().iter() {
            println!("  {symbol:?} ({}): {codeword}", table.get(symbol).unwrap_or(0));
        }
    }

    if args.raw {
        println!("Binary string of UTF-8: {}", byte_bits(text.bytes()));
        println!("Binary string of UTF-16BE: {}", byte_bits(text.encode_utf16().flat_map(u16::to_be_bytes)));
    }

    if args.bytes {
        println!("Padded byte size: {} bytes", encoded.to_padded_bytes().len());
    }

    let compressed_size = least_bytes_repr_for_bits(encoded.len());
    println!("Original size: {} bytes\nCompressed size: {} bytes\nCompression ratio: {}%",
        text.len(), compressed_size, (compressed_size as f64 / text.len().max(1) as f64 * 100.0) as i32);

    Ok(())
}


fn main() -> ExitCode {

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn check_byte_bits() {
        assert_eq!(byte_bits([0x41, 0x01]), "0100000100000001");
        assert_eq!(byte_bits("é".bytes()), "1100001110101001");
        assert_eq!(byte_bits([]), "");
    }


    #[test]
    fn check_args() {

        let args = Args::try_parse_from(["huffman_codes", "--table", "abracadabra"]).unwrap();
        assert_eq!(args.text.as_deref(), Some("abracadabra"));
        assert!(args.table);
        assert!(!args.raw);
        assert!(!args.bytes);

        let args = Args::try_parse_from(["huffman_codes", "-b", "abc"]).unwrap();
        assert!(args.bytes);
        assert!(run(args).is_ok());

        assert!(Args::try_parse_from(["huffman_codes", "--file", "x.txt", "text"]).is_err());
        assert!(run(Args::try_parse_from(["huffman_codes", "-t", "-r", "aaaa"]).unwrap()).is_ok());
    }

}
