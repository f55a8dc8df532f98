// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
 _
| |_ _____ _   _ ___ _____  ____ _   _ _____
|  _) ___ ( \ / ) __) ___ |/ ___) | | | ___ |
| |_| ____|) X (\__ \ ____| |   \ V /| ____|
 \___)_____|_/ \_|___/_____)_|    \_/ |_____)

    LaTeX Compilation Service
"#;
    println!("{}", banner);
}
