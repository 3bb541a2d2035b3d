use clap::{arg, crate_version, Command};

use multiset_codec::codecs::uniform::Uniform;
use multiset_codec::{bst, multiset_codec as coder, rans::RansState, tools, STD_PARAMS};

const RCH: &str = "unreachable was reached";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let long_help = "Examples:
---------
Compress:      `multiset-codec compress -i my_file -o my_file.mset`
Expand:        `multiset-codec expand -i my_file.mset -o my_file`";

    let mut main_cmd = Command::new("multiset-codec")
        .about("Losslessly compress a file's bytes as a multiset")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("compress")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .about("compress a file"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("expand")
            .arg(arg!(-i --input <PATH> "input path").required(true))
            .arg(arg!(-o --output <PATH> "output path").required(true))
            .about("expand a file"),
    );

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        log::debug!("read {} bytes from {}", dat.len(), path_in);
        let compressed = compress(&dat)?;
        std::fs::write(path_out, compressed)?;
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let expanded = expand(&dat)?;
        std::fs::write(path_out, expanded)?;
    }

    Ok(())
}

/// Compress a byte buffer: build its multiset, code it through the Multiset
/// codec with a per-byte `Uniform(256)` symbol codec, and serialize the final
/// rANS state behind an 8-byte little-endian element count (`decode` needs
/// `M` up front, spec §4.3).
fn compress(data: &[u8]) -> multiset_codec::Result<Vec<u8>> {
    let codec = Uniform::new(256);
    let values: Vec<u64> = data.iter().map(|&b| b as u64).collect();
    let multiset = bst::build_multiset(values);
    let state = RansState::bootstrap(&STD_PARAMS);
    let encoded = coder::encode(state, &multiset, &codec, &STD_PARAMS).map_err(|e| {
        log::error!("compression failed: {e}");
        e
    })?;

    let mut out = Vec::with_capacity(8 + encoded.tail().len() * 4);
    out.extend_from_slice(&(data.len() as u64).to_le_bytes());
    out.extend_from_slice(&tools::serialize(&encoded, &STD_PARAMS));
    Ok(out)
}

/// Inverse of [`compress`].
fn expand(data: &[u8]) -> multiset_codec::Result<Vec<u8>> {
    if data.len() < 8 {
        return Err(multiset_codec::Error::Serialization(
            "truncated element count header".into(),
        ));
    }
    let len = u64::from_le_bytes(data[..8].try_into().expect("slice is 8 bytes"));
    let state = tools::deserialize(&data[8..], &STD_PARAMS)?;
    let codec = Uniform::new(256);
    let (_, multiset) = coder::decode(state, len, &codec, &STD_PARAMS).map_err(|e| {
        log::error!("expansion failed: {e}");
        e
    })?;
    Ok(tools::flatten(&multiset).into_iter().map(|v| v as u8).collect())
}
