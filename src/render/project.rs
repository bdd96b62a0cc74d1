// ── Project file (.csproj) ────────────────────────────────────────────────────
//
// MSBuild 2003-schema library project.  Item groups are emitted in the order
// references, compile items, other items; each item line ends with `\n`
// before the group's closing tag.  Values are inserted verbatim.

use std::{fmt, path::Path};

use super::{
    ident::{project_id, DerivedId},
    model::{windows_path, ProjectDescriptor, ProjectReference},
};
use crate::version::VisualStudioVersion;

/// One line (or element) inside an `<ItemGroup>`.
enum Item {
    Reference { name: String },
    HintedReference { name: String, hint: String },
    Compile(String),
    NonCode(String),
}

impl Item {
    fn reference(r: &ProjectReference) -> Self {
        match r.hint_path() {
            Some(hint) => Self::HintedReference {
                name: r.name.clone(),
                hint: windows_path(hint),
            },
            None => Self::Reference {
                name: r.name.clone(),
            },
        }
    }

    fn compile(path: &Path) -> Self {
        Self::Compile(windows_path(path))
    }

    fn non_code(path: &Path) -> Self {
        Self::NonCode(windows_path(path))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference { name } => write!(f, "    <Reference Include=\"{name}\"/>"),
            Self::HintedReference { name, hint } => write!(
                f,
                "    <Reference Include=\"{name}\">\n      <HintPath>{hint}</HintPath>\n    </Reference>"
            ),
            Self::Compile(path) => write!(f, "    <Compile Include=\"{path}\"/>"),
            Self::NonCode(path) => write!(f, "    <None Include=\"{path}\"/>"),
        }
    }
}

/// Items of one group, each terminated by a newline.
struct ItemGroup(Vec<Item>);

impl fmt::Display for ItemGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.0 {
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}

/// `A;B;`: every define is followed by a separator.
struct Defines<'a>(&'a [String]);

impl fmt::Display for Defines<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for define in self.0 {
            write!(f, "{define};")?;
        }
        Ok(())
    }
}

struct ProjectFile<'a> {
    tools_version: &'static str,
    guid: DerivedId,
    assembly_name: &'a str,
    defines: Defines<'a>,
    references: ItemGroup,
    code: ItemGroup,
    non_code: ItemGroup,
}

impl fmt::Display for ProjectFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            tools_version,
            guid,
            assembly_name,
            defines,
            references,
            code,
            non_code,
        } = self;

        write!(
            f,
            r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="{tools_version}" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <Import Project="$(MSBuildExtensionsPath)\$(MSBuildToolsVersion)\Microsoft.Common.props" Condition="Exists('$(MSBuildExtensionsPath)\$(MSBuildToolsVersion)\Microsoft.Common.props')" />
  <PropertyGroup>
    <Configuration Condition = " '$(Configuration)' == '' ">Debug</Configuration>
    <Platform Condition = " '$(Platform)' == '' ">AnyCPU</Platform>
    <ProjectGuid>{{{guid}}}</ProjectGuid>
    <OutputType>Library</OutputType>
    <AppDesignerFolder>Properties</AppDesignerFolder>
    <RootNamespace></RootNamespace>
    <AssemblyName>{assembly_name}</AssemblyName>
    <TargetFrameworkVersion>v4.0</TargetFrameworkVersion>
    <FileAlignment>512</FileAlignment>
    <BaseDirectory>Resources</BaseDirectory>
    <SchemaVersion>2.0</SchemaVersion>
  </PropertyGroup>
    <PropertyGroup Condition = " '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">
    <DebugSymbols>true</DebugSymbols>
    <DebugType>full</DebugType>
    <Optimize>false</Optimize>
    <OutputPath>Internal\Temp\Assemblies\Debug\</OutputPath>
    <DefineConstants>DEBUG;TRACE;{defines}</DefineConstants>
    <ErrorReport>prompt</ErrorReport>
    <WarningLevel>4</WarningLevel >
  </PropertyGroup>
  <PropertyGroup Condition = " '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">
    <DebugType>pdbonly</DebugType>
    <Optimize>true</Optimize>
    <OutputPath>Internal\Temp\Assemblies\Release\</OutputPath>
    <DefineConstants>TRACE;{defines}</DefineConstants>
    <ErrorReport>prompt</ErrorReport>
    <WarningLevel>4</WarningLevel>
  </PropertyGroup>
  <ItemGroup>
{references}
  </ItemGroup>
  <ItemGroup>
{code}
  </ItemGroup>
  <ItemGroup>
{non_code}
  </ItemGroup>
  <Import Project = "$(MSBuildToolsPath)\Microsoft.CSharp.targets"/>
</Project>"#
        )
    }
}

/// Render the `.csproj` text for `project`.
pub fn render_project(version: VisualStudioVersion, project: &ProjectDescriptor) -> String {
    let file = ProjectFile {
        tools_version: version.metadata().tools_version,
        guid: project_id(&project.name),
        assembly_name: &project.name,
        defines: Defines(&project.defines),
        references: ItemGroup(project.references.iter().map(Item::reference).collect()),
        code: ItemGroup(project.code_files.iter().map(|p| Item::compile(p)).collect()),
        non_code: ItemGroup(project.non_code_files.iter().map(|p| Item::non_code(p)).collect()),
    };

    file.to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PRJ_CORE: &str = "1ac833dc-c418-ad92-5410-ce8854d2e72c";

    fn core() -> ProjectDescriptor {
        ProjectDescriptor {
            name: "Core".to_owned(),
            code_files: vec!["Scripts/Player.cs".into(), "Scripts/Enemy.cs".into()],
            non_code_files: vec!["README.txt".into()],
            references: vec![
                ProjectReference::system("System"),
                ProjectReference::with_path("Engine", "Assemblies/Engine.dll"),
            ],
            defines: vec!["GAME".to_owned(), "WINDOWS".to_owned()],
        }
    }

    /// Lines between the n-th `<ItemGroup>` and its closing tag.
    fn item_group(text: &str, n: usize) -> &str {
        let start = text.match_indices("  <ItemGroup>\n").nth(n).unwrap().0 + "  <ItemGroup>\n".len();
        let end = start + text[start..].find("  </ItemGroup>").unwrap();
        &text[start..end]
    }

    #[test]
    fn header_carries_tools_version_and_guid() {
        let text = render_project(VisualStudioVersion::Vs2013, &core());
        assert!(text.starts_with(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Project ToolsVersion=\"12.0\" DefaultTargets=\"Build\""
        ));
        assert!(text.contains(&format!("    <ProjectGuid>{{{PRJ_CORE}}}</ProjectGuid>\n")));
        assert!(text.contains("    <AssemblyName>Core</AssemblyName>\n"));
        assert!(text.ends_with("  <Import Project = \"$(MSBuildToolsPath)\\Microsoft.CSharp.targets\"/>\n</Project>"));
    }

    #[test]
    fn tools_version_follows_target() {
        let text = render_project(VisualStudioVersion::Vs2008, &ProjectDescriptor::new("Core"));
        assert!(text.contains("<Project ToolsVersion=\"3.5\" "));
    }

    #[test]
    fn defines_are_semicolon_terminated() {
        let text = render_project(VisualStudioVersion::Vs2015, &core());
        assert!(text.contains("<DefineConstants>DEBUG;TRACE;GAME;WINDOWS;</DefineConstants>"));
        assert!(text.contains("<DefineConstants>TRACE;GAME;WINDOWS;</DefineConstants>"));
    }

    #[test]
    fn item_groups_in_order() {
        let text = render_project(VisualStudioVersion::Vs2015, &core());
        assert_eq!(
            item_group(&text, 0),
            "    <Reference Include=\"System\"/>\n\
             \x20   <Reference Include=\"Engine\">\n\
             \x20     <HintPath>Assemblies\\Engine.dll</HintPath>\n\
             \x20   </Reference>\n\n"
        );
        assert_eq!(
            item_group(&text, 1),
            "    <Compile Include=\"Scripts\\Player.cs\"/>\n\
             \x20   <Compile Include=\"Scripts\\Enemy.cs\"/>\n\n"
        );
        assert_eq!(item_group(&text, 2), "    <None Include=\"README.txt\"/>\n\n");
    }

    #[test]
    fn empty_reference_path_renders_name_only() {
        let mut p = ProjectDescriptor::new("Core");
        p.references.push(ProjectReference::with_path("System.Xml", ""));
        let text = render_project(VisualStudioVersion::Vs2015, &p);
        assert!(text.contains("    <Reference Include=\"System.Xml\"/>\n"));
        assert!(!text.contains("<HintPath>"));
    }

    #[test]
    fn empty_project_is_balanced() {
        let text = render_project(VisualStudioVersion::Vs2010, &ProjectDescriptor::new("Empty"));
        assert_eq!(text.matches("<ItemGroup>").count(), 3);
        assert_eq!(text.matches("</ItemGroup>").count(), 3);
        assert_eq!(
            text.matches("<PropertyGroup").count(),
            text.matches("</PropertyGroup>").count()
        );
        assert!(text.contains("  <ItemGroup>\n\n  </ItemGroup>\n"));
        assert!(text.contains("<DefineConstants>DEBUG;TRACE;</DefineConstants>"));
    }

    #[test]
    fn rendering_is_pure() {
        assert_eq!(
            render_project(VisualStudioVersion::Vs2013, &core()),
            render_project(VisualStudioVersion::Vs2013, &core())
        );
    }
}
