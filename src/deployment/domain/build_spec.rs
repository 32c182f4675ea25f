//! Build specification: generated source plus a fixed Vite scaffold.

use minijinja::HtmlEscape;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::naming::slugify;

/// Path of the generated component inside the scaffold.
pub const APP_SOURCE_PATH: &str = "src/App.tsx";

/// One file uploaded with a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFile {
    /// Path relative to the project root.
    pub file: String,
    /// File content.
    pub content: String,
}

impl BuildFile {
    fn new(file: &str, content: impl Into<String>) -> Self {
        Self {
            file: file.to_owned(),
            content: content.into(),
        }
    }
}

/// Everything a deployment provider needs to build and host one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpec {
    name: String,
    framework: String,
    build_command: String,
    output_directory: String,
    files: Vec<BuildFile>,
    env: BTreeMap<String, String>,
}

impl BuildSpec {
    /// Wraps generated `source` in a Vite React project named after
    /// `app_name`.
    #[must_use]
    pub fn for_app(app_name: &str, source: impl Into<String>) -> Self {
        let name = slugify(app_name, "app");
        let files = vec![
            BuildFile::new("package.json", package_json(&name)),
            BuildFile::new("index.html", index_html(app_name)),
            BuildFile::new("vite.config.ts", VITE_CONFIG),
            BuildFile::new("src/main.tsx", MAIN_TSX),
            BuildFile::new(APP_SOURCE_PATH, source),
        ];
        Self {
            name,
            framework: "vite".to_owned(),
            build_command: "npm run build".to_owned(),
            output_directory: "dist".to_owned(),
            files,
            env: BTreeMap::new(),
        }
    }

    /// Adds a build environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Returns the project slug.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the framework preset.
    #[must_use]
    pub fn framework(&self) -> &str {
        &self.framework
    }

    /// Returns the build command.
    #[must_use]
    pub fn build_command(&self) -> &str {
        &self.build_command
    }

    /// Returns the build output directory.
    #[must_use]
    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }

    /// Returns the uploaded files.
    #[must_use]
    pub fn files(&self) -> &[BuildFile] {
        &self.files
    }

    /// Returns the build environment.
    #[must_use]
    pub const fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Returns the generated component source.
    #[must_use]
    pub fn app_source(&self) -> Option<&str> {
        self.files
            .iter()
            .find(|file| file.file == APP_SOURCE_PATH)
            .map(|file| file.content.as_str())
    }
}

const VITE_CONFIG: &str = "\
import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
});
";

const MAIN_TSX: &str = "\
import { StrictMode } from 'react';
import { createRoot } from 'react-dom/client';
import App from './App';

createRoot(document.getElementById('root')!).render(
  <StrictMode>
    <App />
  </StrictMode>,
);
";

fn package_json(name: &str) -> String {
    let manifest = json!({
        "name": name,
        "private": true,
        "version": "0.0.0",
        "type": "module",
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "dependencies": {
            "react": "^18.3.1",
            "react-dom": "^18.3.1"
        },
        "devDependencies": {
            "@types/react": "^18.3.3",
            "@types/react-dom": "^18.3.0",
            "@vitejs/plugin-react": "^4.3.1",
            "typescript": "^5.5.3",
            "vite": "^5.4.0"
        }
    });
    format!("{manifest:#}\n")
}

fn index_html(title: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"UTF-8\" />\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\" />\n    \
         <title>{}</title>\n    <script src=\"https://cdn.tailwindcss.com\"></script>\n  \
         </head>\n  <body>\n    <div id=\"root\"></div>\n    \
         <script type=\"module\" src=\"/src/main.tsx\"></script>\n  </body>\n</html>\n",
        HtmlEscape(title)
    )
}
