//! `setup.py` rendering
//!
//! Formatting only: every decision has already been made when the
//! [`PackagingDescription`] was built. Field order is fixed so regenerating the
//! manifest of a published release reproduces it byte for byte.

use crate::manifest::model::{PackageDiscovery, PackagingDescription};
use std::fmt;

/// Well-known manifest file name
pub const MANIFEST_FILE: &str = "setup.py";

const INDENT: &str = "    ";

impl PackagingDescription {
  /// Render the manifest text
  pub fn render(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for PackagingDescription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let imports = if self.discovery.is_namespace() {
      "find_namespace_packages, setup"
    } else {
      "setup"
    };

    writeln!(f, "# This file was generated by ansible-build-meta. Do not edit.")?;
    writeln!(f, "import io")?;
    writeln!(f, "import os")?;
    writeln!(f)?;
    writeln!(f, "from setuptools import {}", imports)?;
    writeln!(f)?;
    writeln!(f)?;
    writeln!(
      f,
      "with io.open(os.path.join(os.path.dirname(__file__), 'README.rst'), encoding='utf-8') as f:"
    )?;
    writeln!(f, "{}long_description = f.read()", INDENT)?;
    writeln!(f)?;
    writeln!(f)?;
    writeln!(f, "setup(")?;

    let fields = &self.fields;
    let mut w = Fields { f: &mut *f, depth: 1 };
    w.string("name", fields.name)?;
    w.string("version", &self.version.to_string())?;
    w.string("description", fields.description)?;
    w.raw("long_description", "long_description")?;
    w.string("long_description_content_type", "text/x-rst")?;
    w.string("author", fields.author)?;
    w.string("author_email", fields.author_email)?;
    w.string("url", fields.url)?;
    w.string_map("project_urls", fields.project_urls.iter().map(|(k, v)| (*k, *v)))?;
    w.string("license", fields.license)?;
    w.string("python_requires", &self.python_requires)?;

    match &self.discovery {
      PackageDiscovery::Namespace {
        include,
        exclude,
        package_data,
      } => {
        w.open("packages", "find_namespace_packages(")?;
        w.string_list("include", include)?;
        w.string_list("exclude", exclude)?;
        w.close(")")?;
        w.list_map("package_data", package_data)?;
      }
      PackageDiscovery::Flat {
        package,
        exclude_package_data,
      } => {
        w.raw("packages", &format!("[{}]", py_str(package)))?;
        w.raw("include_package_data", "True")?;
        if let Some(map) = exclude_package_data {
          w.list_map("exclude_package_data", map)?;
        }
      }
    }

    w.open("install_requires", "[")?;
    w.indent()?;
    write!(w.f, "{},", py_str(&self.dependencies.core))?;
    writeln!(w.f, "{}", self.dependencies.collection_deps)?;
    w.close("]")?;

    w.string_list("classifiers", &self.classifiers)?;

    w.open("entry_points", "{")?;
    w.string_list_entry("console_scripts", fields.console_scripts)?;
    w.close("}")?;

    w.raw("zip_safe", "False")?;
    writeln!(f, ")")
  }
}

/// Writes `key=value,` lines of a call, tracking nesting depth
struct Fields<'a, 'b> {
  f: &'a mut fmt::Formatter<'b>,
  depth: usize,
}

impl Fields<'_, '_> {
  fn indent(&mut self) -> fmt::Result {
    for _ in 0..self.depth {
      self.f.write_str(INDENT)?;
    }
    Ok(())
  }

  fn raw(&mut self, key: &str, value: &str) -> fmt::Result {
    self.indent()?;
    writeln!(self.f, "{}={},", key, value)
  }

  fn string(&mut self, key: &str, value: &str) -> fmt::Result {
    self.raw(key, &py_str(value))
  }

  fn open(&mut self, key: &str, opener: &str) -> fmt::Result {
    self.indent()?;
    writeln!(self.f, "{}={}", key, opener)?;
    self.depth += 1;
    Ok(())
  }

  fn open_entry(&mut self, key: &str, opener: &str) -> fmt::Result {
    self.indent()?;
    writeln!(self.f, "{}: {}", py_str(key), opener)?;
    self.depth += 1;
    Ok(())
  }

  fn close(&mut self, closer: &str) -> fmt::Result {
    self.depth -= 1;
    self.indent()?;
    writeln!(self.f, "{},", closer)
  }

  fn items<S: AsRef<str>>(&mut self, values: &[S]) -> fmt::Result {
    for value in values {
      self.indent()?;
      writeln!(self.f, "{},", py_str(value.as_ref()))?;
    }
    Ok(())
  }

  /// `key=['a', ...],` one item per line; `key=[],` when empty
  fn string_list<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> fmt::Result {
    if values.is_empty() {
      return self.raw(key, "[]");
    }
    self.open(key, "[")?;
    self.items(values)?;
    self.close("]")
  }

  /// `'key': ['a', ...],` inside a dict
  fn string_list_entry<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> fmt::Result {
    self.open_entry(key, "[")?;
    self.items(values)?;
    self.close("]")
  }

  fn string_map<'v>(&mut self, key: &str, entries: impl Iterator<Item = (&'v str, &'v str)>) -> fmt::Result {
    self.open(key, "{")?;
    for (k, v) in entries {
      self.indent()?;
      writeln!(self.f, "{}: {},", py_str(k), py_str(v))?;
    }
    self.close("}")
  }

  /// `key={'pkg': [...], ...},`; `key={},` when empty
  fn list_map(&mut self, key: &str, entries: &[(String, Vec<String>)]) -> fmt::Result {
    if entries.is_empty() {
      return self.raw(key, "{}");
    }
    self.open(key, "{")?;
    for (package, values) in entries {
      self.string_list_entry(package, values)?;
    }
    self.close("}")
  }
}

/// Single-quoted Python string literal
pub fn py_str(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  out.push('\'');
  for c in value.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '\'' => out.push_str("\\'"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c if c.is_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
      c => out.push(c),
    }
  }
  out.push('\'');
  out
}
