/// Raw or normalized file path string.
/// Examples: `S:\Boards\EB\2024\EB_Agenda_03-14-2024.docx`, `S:/Boards/EB/2024/EB_Agenda_03-14-2024.docx`
pub type PathString = String;
/// Final path segment after the last separator.
/// Example: `EB_Agenda_03-14-2024.docx`
pub type FileName = String;
/// Substring of a filename or directory that produced a meeting date.
/// Examples: `03-14-2024`, `March2024`, `20240314`
pub type DateToken = String;
/// Row fragment hashed into a report fingerprint.
/// Example: `EB|2024|3|S:/Boards/EB/agenda.docx|-|-`
pub type HashPart = String;
