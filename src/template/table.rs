//! In-memory tables and their validated column layout.
//!
//! A [`Table`] is a named grid of string cells: line 1 holds the column
//! headers, line 2 the directives, and every following line one data row.
//! [`Table::layout`] checks the shape once and classifies every directive, so
//! the compiler passes never see an unvalidated table.

use crate::error::{SheetResult, TemplateError};

use super::directive::{Directive, Template};

/// A named table of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: String,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from its rows. A header row and a directive row are
    /// required.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> SheetResult<Self> {
        let name = name.into();
        if rows.len() < 2 {
            return Err(TemplateError::EmptyTable {
                table: name,
                rows: rows.len(),
            }
            .into());
        }
        Ok(Self { name, rows })
    }

    /// Split delimited text (one line per row) into a table.
    ///
    /// Cells are trimmed and a single pair of surrounding double quotes is
    /// removed. Blank lines are kept so that row numbers match line numbers.
    pub fn from_delimited(
        name: impl Into<String>,
        text: &str,
        delimiter: char,
    ) -> SheetResult<Self> {
        let rows = text
            .lines()
            .map(|line| {
                line.split(delimiter)
                    .map(|cell| strip_quotes(cell.trim()).to_string())
                    .collect()
            })
            .collect();
        Self::new(name, rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Line 1: one display name per column.
    pub fn headers(&self) -> &[String] {
        &self.rows[0]
    }

    /// Line 2: one directive per column.
    pub fn templates(&self) -> &[String] {
        &self.rows[1]
    }

    /// Data rows, numbered from line 3.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows
            .iter()
            .enumerate()
            .skip(2)
            .map(|(i, cells)| Row {
                number: i + 1,
                cells,
            })
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len() - 2
    }

    /// Validate the table's shape and classify its directives.
    pub fn layout(&self) -> Result<TableLayout, TemplateError> {
        let headers = self.headers();
        let templates = self.templates();
        if headers.len() != templates.len() {
            return Err(TemplateError::StructuralMismatch {
                table: self.name.clone(),
                headers: headers.len(),
                templates: templates.len(),
            });
        }

        let mut columns = Vec::new();
        for (index, raw) in templates.iter().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            let template = Template::parse(raw).ok_or_else(|| TemplateError::UnknownTemplate {
                table: self.name.clone(),
                column: index + 1,
                header: headers[index].clone(),
                template: raw.trim().to_string(),
            })?;
            columns.push(Column {
                index,
                header: headers[index].clone(),
                template,
            });
        }

        let ids: Vec<usize> = columns
            .iter()
            .filter(|c| c.template.directive == Directive::Identifier)
            .map(|c| c.index)
            .collect();
        match ids.as_slice() {
            [id_column] => Ok(TableLayout {
                id_column: *id_column,
                columns,
            }),
            _ => Err(TemplateError::MissingIdentifierColumn {
                table: self.name.clone(),
                found: ids.len(),
            }),
        }
    }
}

fn strip_quotes(cell: &str) -> &str {
    if cell.len() >= 2 && cell.starts_with('"') && cell.ends_with('"') {
        &cell[1..cell.len() - 1]
    } else {
        cell
    }
}

/// One data row, borrowed from its table.
#[derive(Debug, Clone, Copy)]
pub struct Row<'t> {
    /// 1-based line number.
    pub number: usize,
    cells: &'t [String],
}

impl<'t> Row<'t> {
    /// The raw cell at a 0-based column, if the row reaches that far.
    pub fn cell(&self, index: usize) -> Option<&'t str> {
        self.cells.get(index).map(String::as_str)
    }

    /// The trimmed cell at a 0-based column, or `None` when missing or blank.
    pub fn value(&self, index: usize) -> Option<&'t str> {
        self.cell(index).map(str::trim).filter(|v| !v.is_empty())
    }
}

/// A column that carries a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// 0-based position in the row.
    pub index: usize,
    pub header: String,
    pub template: Template,
}

impl Column {
    /// 1-based column number, as reported in errors.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Directive-bearing columns of a validated table, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    /// 0-based position of the single `ID` column.
    pub id_column: usize,
    pub columns: Vec<Column>,
}

impl TableLayout {
    /// Columns read by the declaration pass.
    pub fn declarative(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.template.is_declarative())
    }

    /// Columns read by the logic pass.
    pub fn logical(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.template.is_logical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;

    fn table(rows: &[&[&str]]) -> Table {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        Table::new("terms", rows).unwrap()
    }

    #[test]
    fn fewer_than_two_rows_is_empty() {
        let err = Table::new("t", vec![vec!["ID".into()]]).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Template(TemplateError::EmptyTable { rows: 1, .. })
        ));
    }

    #[test]
    fn layout_skips_blank_directives() {
        let t = table(&[
            &["Id", "Notes", "Label"],
            &["ID", "", "A rdfs:label"],
            &["X1", "anything", "Widget"],
        ]);
        let layout = t.layout().unwrap();
        assert_eq!(layout.id_column, 0);
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.declarative().count(), 1);
        assert_eq!(layout.logical().count(), 0);
        assert_eq!(layout.columns[1].number(), 3);
    }

    #[test]
    fn header_and_template_counts_must_match() {
        let t = table(&[&["Id", "Label"], &["ID"]]);
        assert!(matches!(
            t.layout().unwrap_err(),
            TemplateError::StructuralMismatch {
                headers: 2,
                templates: 1,
                ..
            }
        ));
    }

    #[test]
    fn exactly_one_identifier_column() {
        let none = table(&[&["Label"], &["A rdfs:label"]]);
        assert!(matches!(
            none.layout().unwrap_err(),
            TemplateError::MissingIdentifierColumn { found: 0, .. }
        ));
        let two = table(&[&["Id", "Other"], &["ID", "ID"]]);
        assert!(matches!(
            two.layout().unwrap_err(),
            TemplateError::MissingIdentifierColumn { found: 2, .. }
        ));
    }

    #[test]
    fn unknown_template_names_its_column() {
        let t = table(&[&["Id", "Label"], &["ID", "LABEL rdfs:label"]]);
        match t.layout().unwrap_err() {
            TemplateError::UnknownTemplate {
                table,
                column,
                header,
                template,
            } => {
                assert_eq!(table, "terms");
                assert_eq!(column, 2);
                assert_eq!(header, "Label");
                assert_eq!(template, "LABEL rdfs:label");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rows_are_numbered_by_line_and_may_be_short() {
        let t = table(&[
            &["Id", "Label"],
            &["ID", "A rdfs:label"],
            &["X1"],
            &["X2", "  "],
        ]);
        let rows: Vec<Row<'_>> = t.rows().collect();
        assert_eq!(t.row_count(), 2);
        assert_eq!(rows[0].number, 3);
        assert_eq!(rows[0].cell(1), None);
        assert_eq!(rows[1].number, 4);
        assert_eq!(rows[1].cell(1), Some("  "));
        assert_eq!(rows[1].value(1), None);
    }

    #[test]
    fn delimited_text_keeps_blank_lines() {
        let text = "Id\tLabel\nID\tA rdfs:label\n\"X1\"\t Widget \n\nX2\tGizmo\n";
        let t = Table::from_delimited("tsv", text, '\t').unwrap();
        let rows: Vec<Row<'_>> = t.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].value(0), Some("X1"));
        assert_eq!(rows[0].value(1), Some("Widget"));
        assert_eq!(rows[1].value(0), None);
        assert_eq!(rows[2].number, 5);
    }
}
