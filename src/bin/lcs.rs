use lcstree::lcs::longest_common_substrings;

use std::fs;
use std::io::{self, Read};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "lcs",
    about = "find the longest common substrings of two strings"
)]
struct Opt {
    /// Input file with one string per line, stdin if not present
    #[structopt(long = "input_file")]
    input_file: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    let input = match opt.input_file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let mut lines = input.lines();
    let s1 = lines.next().unwrap_or("");
    let s2 = lines.next().unwrap_or("");

    let (max_len, subs) = longest_common_substrings(s1.as_bytes(), s2.as_bytes());
    println!("{}", max_len);
    for s in subs {
        println!("{}", String::from_utf8_lossy(&s));
    }
    Ok(())
}
