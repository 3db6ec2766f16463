/* Marker attribute source, emitted once per generation run */

pub const ATTRIBUTE_FILE_NAME: &str = "DiscriminatedUnionAttribute.g.cs";

pub const ATTRIBUTE_SOURCE: &str = r#"// <auto-generated />
using System;

namespace CSharp.DiscriminatedUnions
{
    /// <summary>
    /// Marks a partial type as a discriminated union. Every
    /// <c>static partial</c> method without a body that the type declares
    /// becomes one case.
    /// </summary>
    /// <example>
    /// <code>
    /// [DiscriminatedUnion]
    /// public abstract partial record Shape
    /// {
    ///     public static partial Shape Dot();
    ///     public static partial Shape Circle(double radius);
    /// }
    /// </code>
    /// </example>
    [AttributeUsage(AttributeTargets.Class | AttributeTargets.Struct)]
    internal sealed class DiscriminatedUnionAttribute : Attribute
    {
    }
}
"#;
