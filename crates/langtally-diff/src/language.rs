// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Filename to language classification
//!
//! Language names follow the labels GitHub reports from its repository
//! languages endpoint, so commit-mode and repository-mode totals share keys.

/// Classify a file path by language
///
/// Well-known file names (`Makefile`, `Dockerfile`, ...) are matched first,
/// then the file extension, case-insensitively. Returns `None` for files with
/// no recognized language.
#[must_use]
pub fn detect_language(path: &str) -> Option<&'static str> {
    let name = file_name(path);
    if name.is_empty() {
        return None;
    }

    by_file_name(name).or_else(|| {
        let (stem, extension) = name.rsplit_once('.')?;
        if stem.is_empty() {
            // Dotfiles such as `.gitignore` have no extension
            return None;
        }
        by_extension(&extension.to_ascii_lowercase())
    })
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn by_file_name(name: &str) -> Option<&'static str> {
    let language = match name {
        "Makefile" | "GNUmakefile" | "makefile" => "Makefile",
        "Dockerfile" | "Containerfile" => "Dockerfile",
        "CMakeLists.txt" => "CMake",
        "Rakefile" | "Gemfile" | "Podfile" | "Vagrantfile" => "Ruby",
        "Jenkinsfile" => "Groovy",
        "BUILD" | "BUILD.bazel" | "WORKSPACE" => "Starlark",
        "meson.build" => "Meson",
        ".bashrc" | ".bash_profile" | ".zshrc" | ".profile" => "Shell",
        _ if name.starts_with("Dockerfile.") => "Dockerfile",
        _ => return None,
    };
    Some(language)
}

fn by_extension(extension: &str) -> Option<&'static str> {
    let language = match extension {
        "rs" => "Rust",
        "c" | "h" => "C",
        "cc" | "cpp" | "cxx" | "c++" | "hh" | "hpp" | "hxx" | "h++" | "ino" => "C++",
        "cs" => "C#",
        "m" => "Objective-C",
        "mm" => "Objective-C++",
        "go" => "Go",
        "java" => "Java",
        "kt" | "kts" => "Kotlin",
        "scala" | "sc" => "Scala",
        "groovy" | "gradle" => "Groovy",
        "clj" | "cljs" | "cljc" | "edn" => "Clojure",
        "swift" => "Swift",
        "dart" => "Dart",
        "py" | "pyw" | "pyi" => "Python",
        "ipynb" => "Jupyter Notebook",
        "rb" | "rake" | "gemspec" => "Ruby",
        "php" | "phtml" => "PHP",
        "pl" | "pm" => "Perl",
        "lua" => "Lua",
        "r" => "R",
        "jl" => "Julia",
        "ex" | "exs" => "Elixir",
        "erl" | "hrl" => "Erlang",
        "hs" | "lhs" => "Haskell",
        "ml" | "mli" => "OCaml",
        "fs" | "fsi" | "fsx" => "F#",
        "elm" => "Elm",
        "nim" => "Nim",
        "zig" => "Zig",
        "v" | "sv" | "svh" => "Verilog",
        "vhd" | "vhdl" => "VHDL",
        "asm" | "s" => "Assembly",
        "f" | "f90" | "f95" | "f03" | "for" => "Fortran",
        "pas" | "pp" => "Pascal",
        "d" => "D",
        "cr" => "Crystal",
        "js" | "mjs" | "cjs" | "jsx" => "JavaScript",
        "ts" | "mts" | "cts" | "tsx" => "TypeScript",
        "coffee" => "CoffeeScript",
        "vue" => "Vue",
        "svelte" => "Svelte",
        "html" | "htm" | "xhtml" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "sass" => "Sass",
        "less" => "Less",
        "sh" | "bash" | "zsh" | "ksh" => "Shell",
        "fish" => "fish",
        "ps1" | "psm1" | "psd1" => "PowerShell",
        "bat" | "cmd" => "Batchfile",
        "sql" => "SQL",
        "plsql" | "pls" => "PLSQL",
        "graphql" | "gql" => "GraphQL",
        "proto" => "Protocol Buffer",
        "tf" | "tfvars" | "hcl" => "HCL",
        "nix" => "Nix",
        "cmake" => "CMake",
        "mk" | "mak" => "Makefile",
        "tex" | "sty" | "cls" => "TeX",
        "md" | "markdown" => "Markdown",
        "rst" => "reStructuredText",
        "json" => "JSON",
        "yml" | "yaml" => "YAML",
        "toml" => "TOML",
        "xml" | "xsd" | "xsl" => "XML",
        "vim" => "Vim Script",
        "el" => "Emacs Lisp",
        "lisp" | "lsp" | "cl" => "Common Lisp",
        "scm" | "ss" => "Scheme",
        "rkt" => "Racket",
        "sol" => "Solidity",
        "wat" | "wast" => "WebAssembly",
        "glsl" | "vert" | "frag" => "GLSL",
        "hlsl" => "HLSL",
        "cu" | "cuh" => "Cuda",
        "m4" => "M4",
        "awk" => "Awk",
        "tcl" => "Tcl",
        "hx" => "Haxe",
        "gd" => "GDScript",
        "purs" => "PureScript",
        "re" | "rei" => "Reason",
        "elv" => "Elvish",
        "ejs" => "EJS",
        "hbs" | "handlebars" => "Handlebars",
        "pug" | "jade" => "Pug",
        "twig" => "Twig",
        "erb" => "HTML+ERB",
        "razor" | "cshtml" => "HTML+Razor",
        "astro" => "Astro",
        "mdx" => "MDX",
        "bicep" => "Bicep",
        "cairo" => "Cairo",
        "move" => "Move",
        "odin" => "Odin",
        "gleam" => "Gleam",
        "mojo" => "Mojo",
        _ => return None,
    };
    Some(language)
}
