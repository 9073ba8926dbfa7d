use anyhow::Result;

use pairpass::passgen;

pub fn test_password(password: &str) -> Result<()> {
    let (rating, score, feedback) = passgen::assess_password_strength(password);
    println!("Password strength: {} (score: {}/4)", rating, score);
    if !feedback.is_empty() {
        println!("Suggestions: {}", feedback);
    }
    Ok(())
}
