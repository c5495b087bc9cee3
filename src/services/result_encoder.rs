//! 结果导出服务 - 业务能力层
//!
//! 把结果列表编码为分号分隔的 CSV 文本。纯函数，不依赖网络或状态。

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::models::SubmissionResult;

/// 建议的下载文件名
pub const EXPORT_FILE_NAME: &str = "codigos_barras.csv";
/// 导出文件类型
pub const EXPORT_MEDIA_TYPE: &str = "text/csv;charset=utf-8;";

const HEADER: [&str; 3] = ["Arquivo", "Codigo_de_Barras", "Status"];

const STATUS_FOUND: &str = "Encontrado";
const STATUS_NOT_FOUND: &str = "Não encontrado";
const STATUS_FAILED: &str = "Erro";

const CODE_NOT_FOUND: &str = "N/A";
const CODE_FAILED: &str = "Erro no processamento";

/// 可下载的导出文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub media_type: &'static str,
}

/// 编码结果列表
///
/// 第二列统一写成 `="<值>"`，避免表格软件把数字串当成数值。
/// 行分隔符为 `\n`，末尾没有多余的换行。
///
/// 写出器本身不加引号；含有 `;`、`"` 或换行的值由 `quote_field` 预先转义，
/// 普通值保持原样。
pub fn encode(results: &[SubmissionResult]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for result in results {
        writer.write_record(row(result))?;
    }

    let mut bytes = writer.into_inner().map_err(|e| e.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }

    Ok(String::from_utf8(bytes)?)
}

/// 编码并打包为可下载文档
pub fn export(results: &[SubmissionResult]) -> Result<ExportDocument, ExportError> {
    Ok(ExportDocument {
        bytes: encode(results)?.into_bytes(),
        file_name: EXPORT_FILE_NAME,
        media_type: EXPORT_MEDIA_TYPE,
    })
}

fn row(result: &SubmissionResult) -> [String; 3] {
    let (filename, code, status) = match result {
        SubmissionResult::Found { filename, code } => (filename, code.as_str(), STATUS_FOUND),
        SubmissionResult::NotFound { filename } => (filename, CODE_NOT_FOUND, STATUS_NOT_FOUND),
        SubmissionResult::Failed { filename, .. } => (filename, CODE_FAILED, STATUS_FAILED),
    };

    let code_cell = format!("=\"{}\"", code);
    let code_cell = if needs_quoting(code) {
        quote_field(&code_cell)
    } else {
        code_cell
    };

    let filename = if needs_quoting(filename) {
        quote_field(filename)
    } else {
        filename.clone()
    };

    [filename, code_cell, status.to_string()]
}

fn needs_quoting(value: &str) -> bool {
    value.contains(&[';', '"', '\r', '\n'][..])
}

/// 用双引号包裹，内部引号加倍
fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
