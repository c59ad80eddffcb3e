//! Path-based file classification.
//!
//! Every rule is a hash lookup on the file name, one of its suffixes, or its
//! extension. File contents are never inspected.

use std::path::Path;

use crate::diff::types::FileCategory;

/// Test-file suffixes, matched against the part of the file name starting at
/// its last `_` or its second-to-last `.`.
static TEST_SUFFIXES: phf::Set<&'static str> = phf::phf_set! {
    // Go, Python, Elixir, Rust integration tests
    "_test.go",
    "_test.py",
    "_test.exs",
    "_test.rs",
    // Ruby
    "_spec.rb",
    // JavaScript / TypeScript
    ".spec.js",
    ".spec.jsx",
    ".spec.ts",
    ".spec.tsx",
    ".test.js",
    ".test.jsx",
    ".test.ts",
    ".test.tsx",
    ".spec.mjs",
    ".test.mjs",
    // Dart
    "_test.dart",
};

static DOC_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "README",
    "README.md",
    "CHANGELOG.md",
    "CONTRIBUTING.md",
    "CODE_OF_CONDUCT.md",
    "LICENSE",
    "AUTHORS",
};

static DOC_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "md",
    "markdown",
    "txt",
    "rst",
};

/// Build, packaging and infrastructure descriptors that are not dependency
/// manifests themselves.
static CONFIG_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "Makefile",
    "Dockerfile",
    "docker-compose.yml",
    "Jenkinsfile",
    "Vagrantfile",
    "Procfile",
    "Rakefile",
    "Justfile",
    ".gitignore",
    ".gitattributes",
    ".dockerignore",
    ".editorconfig",
    ".env.example",
    "tsconfig.json",
};

static CONFIG_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "yml",
    "yaml",
    "toml",
    "json",
    "xml",
    "ini",
    "conf",
    "cfg",
};

/// Package manifests and lockfiles across ecosystems.
static DEPENDENCY_MANIFESTS: phf::Set<&'static str> = phf::phf_set! {
    // Node.js
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // Go
    "go.mod",
    "go.sum",
    // Python
    "requirements.txt",
    "Pipfile",
    "Pipfile.lock",
    "poetry.lock",
    "pyproject.toml",
    // Java / Maven / Gradle
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "gradle.properties",
    // Ruby
    "Gemfile",
    "Gemfile.lock",
    // PHP
    "composer.json",
    "composer.lock",
    // Rust
    "Cargo.toml",
    "Cargo.lock",
    // .NET
    "packages.config",
    "NuGet.config",
    "nuget.config",
    // Swift / CocoaPods
    "Podfile",
    "Podfile.lock",
    "Package.swift",
    // Dart / Flutter
    "pubspec.yaml",
    "pubspec.lock",
    // CMake / Conan / vcpkg
    "CMakeLists.txt",
    "CMakeCache.txt",
    "conanfile.txt",
    "conanfile.py",
    "vcpkg.json",
    // Bazel / Buck
    "WORKSPACE",
    "BUILD",
    "BUILD.bazel",
    "BUCK",
    // Clojure, Elixir, Erlang
    "project.clj",
    "mix.exs",
    "rebar.config",
};

/// .NET project files declare their package references inline.
static DEPENDENCY_EXTENSIONS: phf::Set<&'static str> = phf::phf_set! {
    "csproj",
    "vbproj",
    "fsproj",
};

/// Classify a path. Precedence is Test > Doc > Config > Source.
pub fn classify_path(path: &str) -> FileCategory {
    let name = file_name(path);
    let ext = extension(name);

    if is_test_file(name) {
        return FileCategory::Test;
    }

    // Doc rules win over config rules, so requirements.txt is a doc even
    // though it is also a dependency manifest.
    if DOC_NAMES.contains(name) || ext.is_some_and(|e| DOC_EXTENSIONS.contains(e)) {
        return FileCategory::Doc;
    }

    if CONFIG_NAMES.contains(name) || is_dependency_name(name, ext) {
        return FileCategory::Config;
    }

    if ext.is_some_and(|e| CONFIG_EXTENSIONS.contains(e)) {
        return FileCategory::Config;
    }

    FileCategory::Source
}

/// Whether a path names a dependency manifest or lockfile.
pub fn is_dependency_manifest(path: &str) -> bool {
    let name = file_name(path);
    is_dependency_name(name, extension(name))
}

fn is_dependency_name(name: &str, ext: Option<&str>) -> bool {
    DEPENDENCY_MANIFESTS.contains(name) || ext.is_some_and(|e| DEPENDENCY_EXTENSIONS.contains(e))
}

fn is_test_file(name: &str) -> bool {
    if let Some(pos) = name.rfind('_') {
        if TEST_SUFFIXES.contains(&name[pos..]) {
            return true;
        }
    }

    // "login.test.ts" -> ".test.ts"
    let mut dots = name.rmatch_indices('.').map(|(i, _)| i);
    match (dots.next(), dots.next()) {
        (Some(_), Some(second)) => TEST_SUFFIXES.contains(&name[second..]),
        _ => false,
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}
