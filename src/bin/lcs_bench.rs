use lcstree::lcs::{extract, SEP1, SEP2};
use lcstree::suffix_tree::SuffixTree;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "lcs_bench",
    about = "time suffix tree construction and LCS extraction"
)]
struct Opt {
    #[structopt(long, default_value = "42")]
    seed: u64,

    /// Per-string input sizes in bytes
    #[structopt(long, use_delimiter = true, default_value = "65536,262144,1048576")]
    sizes: Vec<usize>,
}

const CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

fn random_string(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| CHARSET[rng.gen_range(0..CHARSET.len())]).collect()
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    let mut rng = StdRng::seed_from_u64(opt.seed);

    println!("size_bytes,build_sec,find_sec,max_len");
    for &sz in &opt.sizes {
        let s1 = random_string(&mut rng, sz);
        let s2 = random_string(&mut rng, sz);
        let mut text = Vec::with_capacity(2 * sz + 2);
        text.extend_from_slice(&s1);
        text.push(SEP1);
        text.extend_from_slice(&s2);
        text.push(SEP2);

        let t0 = Instant::now();
        let mut tree = SuffixTree::build(&text);
        let build_sec = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        let (max_len, _) = extract(&mut tree, s1.len(), s1.len() + 1 + s2.len())?;
        let find_sec = t1.elapsed().as_secs_f64();

        println!("{},{:.6},{:.6},{}", sz, build_sec, find_sec, max_len);
    }
    Ok(())
}
