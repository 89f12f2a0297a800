use std::env;
use std::fs;
use std::path::Path;

/// Copy a fixture into OUT_DIR for `include_str!`, or write `fallback`.
fn stage(out_dir: &Path, name: &str, fallback: &str) {
    let src = Path::new("../fixtures").join(name);
    let dest = out_dir.join(name);
    if src.exists() {
        fs::copy(&src, &dest).unwrap();
    } else {
        fs::write(&dest, fallback).unwrap();
    }
    println!("cargo:rerun-if-changed=../fixtures/{}", name);
}

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let out_dir = Path::new(&out_dir);

    stage(out_dir, "dashboard.json", "{}\n");
    stage(
        out_dir,
        "market_prices.csv",
        "date,commodity,state,district,market,pricePerKg,avgPrice\n",
    );
    stage(
        out_dir,
        "mandi_data.csv",
        "name,commodity,price,address,latitude,longitude,type\n",
    );

    println!("cargo:rerun-if-changed=build.rs");
}
