use anyhow::Result;
use std::process::Command;
use which::which;

struct Tool {
    name: &'static str,
    version_arg: &'static str,
    install_hint: &'static str,
}

const TOOLS: [Tool; 3] = [
    Tool {
        name: "spotdl",
        version_arg: "--version",
        install_hint: "pipx install spotdl",
    },
    Tool {
        name: "yt-dlp",
        version_arg: "--version",
        install_hint: "pipx install yt-dlp",
    },
    Tool {
        name: "ffmpeg",
        version_arg: "-version",
        install_hint: "apt install ffmpeg (or brew install ffmpeg)",
    },
];

pub async fn run() -> Result<()> {
    println!("albumdl dependency check\n");

    let mut all_ok = true;

    for tool in &TOOLS {
        print!("{:<8} ", format!("{}:", tool.name));
        match which(tool.name) {
            Ok(path) => match Command::new(&path).arg(tool.version_arg).output() {
                Ok(out) => {
                    let stdout = String::from_utf8_lossy(&out.stdout);
                    println!("OK ({})", version_of(tool.name, &stdout));
                }
                Err(_) => {
                    println!("FOUND but failed to get version");
                    all_ok = false;
                }
            },
            Err(_) => {
                println!("NOT FOUND");
                println!("         Install with: {}", tool.install_hint);
                all_ok = false;
            }
        }
    }

    println!();
    if all_ok {
        println!("All dependencies OK!");
    } else {
        println!("Some dependencies are missing. See above for installation instructions.");
    }

    Ok(())
}

/// Pull a short version string out of a tool's version output
fn version_of(name: &str, stdout: &str) -> String {
    let first_line = stdout.lines().next().unwrap_or("").trim();
    if name == "ffmpeg" {
        // "ffmpeg version 6.1.1 Copyright ..."
        first_line
            .split_whitespace()
            .nth(2)
            .unwrap_or("unknown")
            .to_string()
    } else {
        first_line.to_string()
    }
}
