use std::{env, fs, path::Path};
use std::io::{BufRead, BufReader};

// 与 src/wordlist.rs 中的 MIN_WORD_LEN 保持一致
const MIN_WORD_LEN: usize = 3;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("word_data.rs");

    // 读取数据文件
    let data_file = "data/wordlist.txt";
    let file = fs::File::open(data_file).expect("Failed to open data file");
    let reader = BufReader::new(file);

    let mut word_array = Vec::new();

    for line in reader.lines() {
        let line = line.expect("Error reading line");
        let word = line.trim();
        if word.is_empty() || word.starts_with('#') {
            continue; // 跳过空行和注释
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            panic!("Invalid word in data file: {}", line);
        }
        if word.len() < MIN_WORD_LEN {
            panic!("Word shorter than {} characters in data file: {}", MIN_WORD_LEN, line);
        }

        word_array.push(format!("{:?}", word.to_ascii_lowercase()));
    }

    if word_array.is_empty() {
        panic!("Data file {} contains no words", data_file);
    }

    // 生成Rust代码
    let code = format!(r#"pub static WORDS: [&str; {}] = [{}];"#,
        word_array.len(),
        word_array.join(", ")
    );

    fs::write(dest_path, code).expect("Failed to write generated file");

    // 确保数据文件变化时重建
    println!("cargo:rerun-if-changed={}", data_file);
}
