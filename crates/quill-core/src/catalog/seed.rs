//! The tool set every fresh catalog starts with.

use crate::models::{PdfTool, ToolCategory};

struct SeedTool {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: ToolCategory,
    premium: bool,
    required_settings: &'static [&'static str],
    output_suffix: &'static str,
    multi_file: bool,
}

const SEED_TOOLS: &[SeedTool] = &[
    SeedTool {
        id: "merge",
        name: "Merge PDF",
        description: "Combine several PDFs into one document",
        category: ToolCategory::Organize,
        premium: false,
        required_settings: &[],
        output_suffix: "merged",
        multi_file: true,
    },
    SeedTool {
        id: "split",
        name: "Split PDF",
        description: "Extract pages or page ranges into separate files",
        category: ToolCategory::Organize,
        premium: false,
        required_settings: &["ranges"],
        output_suffix: "split",
        multi_file: false,
    },
    SeedTool {
        id: "compress",
        name: "Compress PDF",
        description: "Reduce file size while keeping quality",
        category: ToolCategory::Optimize,
        premium: false,
        required_settings: &[],
        output_suffix: "compressed",
        multi_file: false,
    },
    SeedTool {
        id: "pdf-to-word",
        name: "PDF to Word",
        description: "Convert PDF documents to editable Word files",
        category: ToolCategory::Convert,
        premium: false,
        required_settings: &[],
        output_suffix: "converted",
        multi_file: false,
    },
    SeedTool {
        id: "word-to-pdf",
        name: "Word to PDF",
        description: "Turn Word documents into PDF",
        category: ToolCategory::Convert,
        premium: false,
        required_settings: &[],
        output_suffix: "converted",
        multi_file: false,
    },
    SeedTool {
        id: "rotate",
        name: "Rotate PDF",
        description: "Rotate pages to the right orientation",
        category: ToolCategory::Organize,
        premium: false,
        required_settings: &["angle"],
        output_suffix: "rotated",
        multi_file: false,
    },
    SeedTool {
        id: "watermark",
        name: "Add Watermark",
        description: "Stamp text over every page",
        category: ToolCategory::Edit,
        premium: false,
        required_settings: &["watermark_text"],
        output_suffix: "watermarked",
        multi_file: false,
    },
    SeedTool {
        id: "ocr",
        name: "OCR PDF",
        description: "Make scanned documents searchable",
        category: ToolCategory::Edit,
        premium: true,
        required_settings: &["language"],
        output_suffix: "ocr",
        multi_file: false,
    },
    SeedTool {
        id: "protect",
        name: "Protect PDF",
        description: "Encrypt a document with a password",
        category: ToolCategory::Security,
        premium: false,
        required_settings: &["password"],
        output_suffix: "protected",
        multi_file: false,
    },
    SeedTool {
        id: "unlock",
        name: "Unlock PDF",
        description: "Remove password protection",
        category: ToolCategory::Security,
        premium: false,
        required_settings: &["password"],
        output_suffix: "unlocked",
        multi_file: false,
    },
    SeedTool {
        id: "page-numbers",
        name: "Page Numbers",
        description: "Add page numbers to a document",
        category: ToolCategory::Edit,
        premium: true,
        required_settings: &[],
        output_suffix: "numbered",
        multi_file: false,
    },
];

/// The default tool catalog, in display order.
pub fn default_tools() -> Vec<PdfTool> {
    SEED_TOOLS
        .iter()
        .map(|seed| PdfTool {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category: seed.category,
            favorite: false,
            premium: seed.premium,
            required_settings: seed
                .required_settings
                .iter()
                .map(ToString::to_string)
                .collect(),
            output_suffix: seed.output_suffix.to_string(),
            multi_file: seed.multi_file,
        })
        .collect()
}
